//! Comprehensive in-crate test suite
//!
//! crate 内的全面测试套件

mod cursor;
