//! 基础设施层
//!
//! 持有稀缺资源（Page），只暴露能力，不处理业务流程

pub mod portal_driver;

pub use portal_driver::{ChromiumDriver, PortalDriver};
