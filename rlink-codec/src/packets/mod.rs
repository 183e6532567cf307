//! 数据包解码模块
//!
//! 每种数据块子类型对应一个记录结构体，均通过一次性的 `decode` 构造：
//! - 定长包：高度、加速度、角速度、GNSS定位
//! - 变长包：GNSS元数据、MPU9250、KX134

pub mod acceleration;
pub mod altitude;
pub mod angular_velocity;
pub mod gnss_location;
pub mod gnss_meta;
pub mod kx134;
pub mod mpu9250;

pub use acceleration::AccelerationData;
pub use altitude::AltitudeData;
pub use angular_velocity::AngularVelocityData;
pub use gnss_location::{FixType, GnssLocationData};
pub use gnss_meta::{GnssMetaData, SatelliteInfo, SatelliteType};
pub use kx134::{Kx134AccelData, Kx134Measurement, SampleResolution};
pub use mpu9250::Mpu9250Data;
