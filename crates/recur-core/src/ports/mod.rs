//! Ports - 抽象化レイヤー
//!
//! 外部（システム時刻など）への依存を trait で切り出します。

pub mod clock;

pub use self::clock::{Clock, FixedClock, SystemClock};
