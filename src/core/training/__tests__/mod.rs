//! # 학습 루프 단위테스트
