//! RMSProp 옵티마이저

use candle_core::backprop::GradStore;
use candle_core::{Result, Var};
use candle_nn::Optimizer;

/// RMSProp 하이퍼파라미터
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamsRmsProp {
    pub lr: f64,
    /// 제곱 평균 감쇠율
    pub decay: f64,
    pub momentum: f64,
    pub epsilon: f64,
}

impl Default for ParamsRmsProp {
    fn default() -> Self {
        Self {
            lr: 0.001,
            decay: 0.9,
            momentum: 0.0,
            epsilon: 1e-10,
        }
    }
}

/// 변수 하나의 RMSProp 상태
#[derive(Debug)]
struct VarRmsProp {
    var: Var,
    /// 제곱 그래디언트 이동 평균 (1로 시작)
    mean_square: Var,
    /// 누적 갱신량
    momentum: Var,
}

/// RMSProp
///
/// ```text
/// ms  = decay * ms + (1 - decay) * g^2
/// mom = momentum * mom + lr * g / sqrt(ms + eps)
/// θ  -= mom
/// ```
///
/// 생성 시 받은 변수만 갱신하며, 그래디언트가 없는 변수는 건너뛴다.
#[derive(Debug)]
pub struct RmsProp {
    vars: Vec<VarRmsProp>,
    params: ParamsRmsProp,
    step_t: usize,
}

impl RmsProp {
    pub fn params(&self) -> &ParamsRmsProp {
        &self.params
    }

    /// 지금까지 수행한 스텝 수
    pub fn steps(&self) -> usize {
        self.step_t
    }

    /// 관리 중인 변수 수
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }
}

impl Optimizer for RmsProp {
    type Config = ParamsRmsProp;

    fn new(vars: Vec<Var>, params: ParamsRmsProp) -> Result<Self> {
        let vars = vars
            .into_iter()
            .filter(|var| var.dtype().is_float())
            .map(|var| {
                let mean_square = Var::ones(var.shape(), var.dtype(), var.device())?;
                let momentum = Var::zeros(var.shape(), var.dtype(), var.device())?;
                Ok(VarRmsProp {
                    var,
                    mean_square,
                    momentum,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            vars,
            params,
            step_t: 0,
        })
    }

    fn learning_rate(&self) -> f64 {
        self.params.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.params.lr = lr;
    }

    fn step(&mut self, grads: &GradStore) -> Result<()> {
        self.step_t += 1;
        let ParamsRmsProp {
            lr,
            decay,
            momentum,
            epsilon,
        } = self.params;

        for state in &self.vars {
            let theta = &state.var;
            if let Some(g) = grads.get(theta) {
                let g = g.detach();
                let next_ms = state
                    .mean_square
                    .as_tensor()
                    .affine(decay, 0.0)?
                    .add(&g.sqr()?.affine(1.0 - decay, 0.0)?)?;
                let denom = next_ms.affine(1.0, epsilon)?.sqrt()?;
                let next_mom = state
                    .momentum
                    .as_tensor()
                    .affine(momentum, 0.0)?
                    .add(&g.div(&denom)?.affine(lr, 0.0)?)?;
                let next_theta = theta.as_tensor().detach().sub(&next_mom)?;

                state.mean_square.set(&next_ms)?;
                state.momentum.set(&next_mom)?;
                theta.set(&next_theta)?;
            }
        }
        Ok(())
    }
}
