//! 遥测块类型目录
//!
//! 定义设备地址、无线电块类型、数据块子类型，以及解码器支持的包类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// 包的源/目的设备地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceAddress {
    GroundStation = 0x0,
    Rocket = 0x1,
    Multicast = 0xF,
}

impl TryFrom<u8> for DeviceAddress {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x0 => Ok(DeviceAddress::GroundStation),
            0x1 => Ok(DeviceAddress::Rocket),
            0xF => Ok(DeviceAddress::Multicast),
            _ => Err(DecodeError::UnknownCode {
                context: "device address",
                code: code.into(),
            }),
        }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceAddress::GroundStation => write!(f, "GROUND STATION"),
            DeviceAddress::Rocket => write!(f, "ROCKET"),
            DeviceAddress::Multicast => write!(f, "MULTICAST"),
        }
    }
}

/// 无线电块类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioBlockType {
    Control = 0x0,
    Command = 0x1,
    Data = 0x2,
    Reserved = 0xF,
}

impl TryFrom<u8> for RadioBlockType {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x0 => Ok(RadioBlockType::Control),
            0x1 => Ok(RadioBlockType::Command),
            0x2 => Ok(RadioBlockType::Data),
            0xF => Ok(RadioBlockType::Reserved),
            _ => Err(DecodeError::UnknownCode {
                context: "radio block type",
                code: code.into(),
            }),
        }
    }
}

/// 数据块子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataBlockSubtype {
    DebugMessage = 0x00,
    Status = 0x01,
    StartupMessage = 0x02,
    Altitude = 0x03,
    Acceleration = 0x04,
    AngularVelocity = 0x05,
    Gnss = 0x06,
    GnssMeta = 0x07,
    Power = 0x08,
    Temperature = 0x09,
    Mpu9250Imu = 0x0A,
    #[serde(rename = "kx134_1211_accel")]
    Kx134Accel = 0x0B,
    Reserved = 0x3F,
}

impl DataBlockSubtype {
    /// 全部子类型，按编码排序
    pub const ALL: [DataBlockSubtype; 13] = [
        DataBlockSubtype::DebugMessage,
        DataBlockSubtype::Status,
        DataBlockSubtype::StartupMessage,
        DataBlockSubtype::Altitude,
        DataBlockSubtype::Acceleration,
        DataBlockSubtype::AngularVelocity,
        DataBlockSubtype::Gnss,
        DataBlockSubtype::GnssMeta,
        DataBlockSubtype::Power,
        DataBlockSubtype::Temperature,
        DataBlockSubtype::Mpu9250Imu,
        DataBlockSubtype::Kx134Accel,
        DataBlockSubtype::Reserved,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// 小写下划线形式的名称，用作遥测输出的键
    pub fn name(self) -> &'static str {
        match self {
            DataBlockSubtype::DebugMessage => "debug_message",
            DataBlockSubtype::Status => "status",
            DataBlockSubtype::StartupMessage => "startup_message",
            DataBlockSubtype::Altitude => "altitude",
            DataBlockSubtype::Acceleration => "acceleration",
            DataBlockSubtype::AngularVelocity => "angular_velocity",
            DataBlockSubtype::Gnss => "gnss",
            DataBlockSubtype::GnssMeta => "gnss_meta",
            DataBlockSubtype::Power => "power",
            DataBlockSubtype::Temperature => "temperature",
            DataBlockSubtype::Mpu9250Imu => "mpu9250_imu",
            DataBlockSubtype::Kx134Accel => "kx134_1211_accel",
            DataBlockSubtype::Reserved => "reserved",
        }
    }
}

impl TryFrom<u8> for DataBlockSubtype {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|subtype| subtype.code() == code)
            .ok_or(DecodeError::UnknownCode {
                context: "data block subtype",
                code: code.into(),
            })
    }
}

impl fmt::Display for DataBlockSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 解码器支持的包类型
///
/// 每个变体对应一个有解码逻辑的数据块子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    Altitude,
    Acceleration,
    AngularVelocity,
    GnssLocation,
    GnssMeta,
    Mpu9250Imu,
    Kx134Accel,
}

impl PacketKind {
    pub const ALL: [PacketKind; 7] = [
        PacketKind::Altitude,
        PacketKind::Acceleration,
        PacketKind::AngularVelocity,
        PacketKind::GnssLocation,
        PacketKind::GnssMeta,
        PacketKind::Mpu9250Imu,
        PacketKind::Kx134Accel,
    ];

    /// 由数据块子类型映射，无解码器的子类型返回 `None`
    pub fn from_subtype(subtype: DataBlockSubtype) -> Option<PacketKind> {
        Self::ALL.into_iter().find(|kind| kind.subtype() == subtype)
    }

    pub fn subtype(self) -> DataBlockSubtype {
        match self {
            PacketKind::Altitude => DataBlockSubtype::Altitude,
            PacketKind::Acceleration => DataBlockSubtype::Acceleration,
            PacketKind::AngularVelocity => DataBlockSubtype::AngularVelocity,
            PacketKind::GnssLocation => DataBlockSubtype::Gnss,
            PacketKind::GnssMeta => DataBlockSubtype::GnssMeta,
            PacketKind::Mpu9250Imu => DataBlockSubtype::Mpu9250Imu,
            PacketKind::Kx134Accel => DataBlockSubtype::Kx134Accel,
        }
    }

    pub fn name(self) -> &'static str {
        self.subtype().name()
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 解析子类型编码，支持十进制和 `0x` 前缀十六进制
fn parse_subtype_code(s: &str) -> Option<u8> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

impl FromStr for PacketKind {
    type Err = DecodeError;

    /// 接受子类型名称（如 `gnss_meta`）或子类型编码（如 `7`、`0x07`）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_name = Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s));
        if let Some(kind) = by_name {
            return Ok(kind);
        }

        parse_subtype_code(s)
            .and_then(|code| DataBlockSubtype::try_from(code).ok())
            .and_then(PacketKind::from_subtype)
            .ok_or_else(|| DecodeError::UnknownName {
                context: "packet kind",
                name: s.to_string(),
            })
    }
}
