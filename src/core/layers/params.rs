//! 네트워크별 학습 파라미터 집합

use anyhow::{bail, ensure, Context, Result};
use candle_core::{Tensor, Var};
use std::collections::{BTreeMap, HashMap};

/// 이름이 붙은 학습 파라미터 모음
///
/// 네트워크 하나가 정확히 하나의 `ParamSet`을 소유하고, 옵티마이저는 이 집합에서
/// 꺼낸 `Var`만 갱신한다. `Var`는 저장소를 공유하므로 레이어가 들고 있는 텐서와
/// 옵티마이저가 들고 있는 변수는 항상 같은 값을 본다.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    owner: String,
    entries: Vec<(String, Var)>,
}

impl ParamSet {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Vec::new(),
        }
    }

    /// 소유 네트워크 이름
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// 파라미터 등록 (이름 중복 불가)
    pub fn insert(&mut self, name: impl Into<String>, var: Var) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            bail!("{}: 파라미터 이름 중복 '{}'", self.owner, name);
        }
        self.entries.push((name, var));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Var> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Var)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// 옵티마이저에 넘길 변수 목록 (저장소 공유)
    pub fn vars(&self) -> Vec<Var> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 전체 스칼라 원소 수
    pub fn element_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.elem_count()).sum()
    }

    /// 현재 값의 복사본
    pub fn snapshot(&self) -> Result<BTreeMap<String, Vec<f32>>> {
        let mut out = BTreeMap::new();
        for (name, var) in &self.entries {
            let values = var.as_tensor().flatten_all()?.to_vec1::<f32>()?;
            out.insert(name.clone(), values);
        }
        Ok(out)
    }

    /// 모든 파라미터 중 절댓값 최대
    pub fn max_abs(&self) -> Result<f32> {
        let mut max = 0.0f32;
        for (_, var) in &self.entries {
            let m = var.as_tensor().abs()?.flatten_all()?.max(0)?.to_scalar::<f32>()?;
            max = max.max(m);
        }
        Ok(max)
    }

    /// 내보내기용 이름-텐서 맵 (값 복사)
    pub fn named_tensors(&self) -> Result<HashMap<String, Tensor>> {
        let mut out = HashMap::new();
        for (name, var) in &self.entries {
            out.insert(name.clone(), var.as_tensor().copy()?);
        }
        Ok(out)
    }

    /// 저장된 텐서로 파라미터 값 덮어쓰기
    ///
    /// 모든 이름이 있어야 하고 형상이 같아야 한다.
    pub fn load_from(&self, tensors: &HashMap<String, Tensor>) -> Result<()> {
        for (name, var) in &self.entries {
            let src = tensors
                .get(name)
                .with_context(|| format!("{}: '{}' 텐서가 없습니다", self.owner, name))?;
            ensure!(
                src.dims() == var.dims(),
                "{}: '{}' 형상 불일치 {:?} vs {:?}",
                self.owner,
                name,
                src.dims(),
                var.dims()
            );
            var.set(&src.to_dtype(var.dtype())?.to_device(var.device())?)?;
        }
        Ok(())
    }
}
