//! # 네트워크 단위테스트
