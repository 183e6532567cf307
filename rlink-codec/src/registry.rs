//! 数据包注册表
//!
//! 按包类型分发到对应的解码器，解码结果统一封装为 `Packet`

use rlink_core::{DecodeError, PacketKind};
use serde::Serialize;

use crate::config::DecoderConfig;
use crate::packets::{
    AccelerationData, AltitudeData, AngularVelocityData, GnssLocationData, GnssMetaData,
    Kx134AccelData, Mpu9250Data,
};

/// 已解码的数据包
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Packet {
    Altitude(AltitudeData),
    Acceleration(AccelerationData),
    AngularVelocity(AngularVelocityData),
    GnssLocation(GnssLocationData),
    GnssMeta(GnssMetaData),
    Mpu9250Imu(Mpu9250Data),
    Kx134Accel(Kx134AccelData),
}

impl Packet {
    /// 按包类型解码载荷
    ///
    /// # 示例
    /// ```
    /// use rlink_codec::{DecoderConfig, Packet, PacketKind};
    ///
    /// let packet = Packet::decode(
    ///     PacketKind::Altitude,
    ///     "000003E800002710000003E800000BB8",
    ///     &DecoderConfig::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(packet.kind(), PacketKind::Altitude);
    /// assert_eq!(packet.mission_time(), 1000);
    /// ```
    pub fn decode(
        kind: PacketKind,
        raw: &str,
        config: &DecoderConfig,
    ) -> Result<Packet, DecodeError> {
        let packet = match kind {
            PacketKind::Altitude => Packet::Altitude(AltitudeData::decode(raw)?),
            PacketKind::Acceleration => {
                Packet::Acceleration(AccelerationData::decode(raw, config.accel_resolution)?)
            }
            PacketKind::AngularVelocity => Packet::AngularVelocity(AngularVelocityData::decode(
                raw,
                config.angular_velocity_resolution,
            )?),
            PacketKind::GnssLocation => Packet::GnssLocation(GnssLocationData::decode(raw)?),
            PacketKind::GnssMeta => Packet::GnssMeta(GnssMetaData::decode(raw)?),
            PacketKind::Mpu9250Imu => Packet::Mpu9250Imu(Mpu9250Data::decode(raw)?),
            PacketKind::Kx134Accel => Packet::Kx134Accel(Kx134AccelData::decode(raw)?),
        };
        Ok(packet)
    }

    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Altitude(_) => PacketKind::Altitude,
            Packet::Acceleration(_) => PacketKind::Acceleration,
            Packet::AngularVelocity(_) => PacketKind::AngularVelocity,
            Packet::GnssLocation(_) => PacketKind::GnssLocation,
            Packet::GnssMeta(_) => PacketKind::GnssMeta,
            Packet::Mpu9250Imu(_) => PacketKind::Mpu9250Imu,
            Packet::Kx134Accel(_) => PacketKind::Kx134Accel,
        }
    }

    /// 包内的任务时间（毫秒）
    pub fn mission_time(&self) -> u32 {
        match self {
            Packet::Altitude(data) => data.time,
            Packet::Acceleration(data) => data.time,
            Packet::AngularVelocity(data) => data.time,
            Packet::GnssLocation(data) => data.fix_time,
            Packet::GnssMeta(data) => data.mission_time,
            Packet::Mpu9250Imu(data) => data.time_stamp,
            Packet::Kx134Accel(data) => data.time_stamp,
        }
    }
}

/// 批量解码同类型载荷，每个载荷独立解码，结果与输入顺序一致
pub fn decode_batch<'a, I>(
    kind: PacketKind,
    payloads: I,
    config: &DecoderConfig,
) -> Vec<Result<Packet, DecodeError>>
where
    I: IntoIterator<Item = &'a str>,
{
    payloads
        .into_iter()
        .map(|raw| Packet::decode(kind, raw, config))
        .collect()
}
