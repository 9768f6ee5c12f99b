//! # 데이터셋 단위테스트
