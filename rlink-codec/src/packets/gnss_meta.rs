//! GNSS卫星元数据包
//!
//! 布局（bit偏移）：
//! - `[0, 32)` 任务时间
//! - `[34, 66)` GPS卫星占用位图，第i位置1表示卫星 i+1 在用
//! - `[66, 98)` GLONASS卫星占用位图
//! - `[98, ..)` 连续的32位卫星信息记录，末尾不足32位的部分丢弃

use std::collections::{BTreeMap, BTreeSet};

use rlink_core::DecodeError;
use serde::Serialize;

use crate::field_extractor::FieldExtractor;

/// 至少要覆盖到GLONASS位图末尾（98位）
pub const GNSS_META_MIN_NIBBLES: usize = 25;

const GPS_BITMAP_START: usize = 34;
const GLONASS_BITMAP_START: usize = 66;
const SAT_INFO_START: usize = 98;
const BITMAP_SLOTS: usize = 32;
const SAT_INFO_BITS: usize = 32;

/// 卫星系统
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SatelliteType {
    Gps,
    Glonass,
}

/// 单颗卫星的信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatelliteInfo {
    /// 仰角（度）
    pub elevation: u8,
    /// 信噪比（dB Hz）
    pub snr: u8,
    /// GPS为PRN，GLONASS为卫星编号
    pub id: u8,
    /// 方位角（度）
    pub azimuth: u16,
    #[serde(rename = "type")]
    pub sat_type: SatelliteType,
}

impl SatelliteInfo {
    /// 从一个32位窗口解码，`offset` 为窗口在载荷中的起始位
    fn decode_at(fields: &FieldExtractor, offset: usize) -> Result<Self, DecodeError> {
        let sat_type = if fields.bit(offset + 31)? {
            SatelliteType::Glonass
        } else {
            SatelliteType::Gps
        };

        Ok(Self {
            elevation: fields.unsigned(offset, offset + 8)? as u8,
            snr: fields.unsigned(offset + 8, offset + 16)? as u8,
            id: fields.unsigned(offset + 16, offset + 21)? as u8,
            azimuth: fields.unsigned(offset + 21, offset + 30)? as u16,
            sat_type,
        })
    }
}

/// GNSS元数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GnssMetaData {
    pub mission_time: u32,
    pub gps_sats_in_use: BTreeSet<u8>,
    pub glonass_sats_in_use: BTreeSet<u8>,
    /// 按卫星ID索引，ID重复时后出现的记录覆盖先前的
    pub sat_info: BTreeMap<u8, SatelliteInfo>,
}

impl GnssMetaData {
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let fields = FieldExtractor::from_hex(raw)?;
        fields.expect_min_nibbles("gnss_meta", GNSS_META_MIN_NIBBLES)?;

        let gps_sats_in_use = Self::sats_in_use(&fields, GPS_BITMAP_START)?;
        let glonass_sats_in_use = Self::sats_in_use(&fields, GLONASS_BITMAP_START)?;

        let num_sats = (fields.bit_len() - SAT_INFO_START) / SAT_INFO_BITS;
        let mut sat_info = BTreeMap::new();
        for i in 0..num_sats {
            let info = SatelliteInfo::decode_at(&fields, SAT_INFO_START + i * SAT_INFO_BITS)?;
            sat_info.insert(info.id, info);
        }

        Ok(Self {
            mission_time: fields.unsigned_nibbles(0, 8)? as u32,
            gps_sats_in_use,
            glonass_sats_in_use,
            sat_info,
        })
    }

    fn sats_in_use(fields: &FieldExtractor, start: usize) -> Result<BTreeSet<u8>, DecodeError> {
        let bitmap = fields.bits(start, start + BITMAP_SLOTS)?;
        Ok(bitmap
            .iter()
            .enumerate()
            .filter(|(_, &in_use)| in_use)
            .map(|(slot, _)| slot as u8 + 1)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlink_core::utils::bits_to_hex;
    use rlink_core::BitString;

    /// 组装载荷：头部98位 + 卫星记录 + 补齐到半字节
    fn build_payload(time: u32, gps: u32, glonass: u32, sats: &[u32], trailing: usize) -> String {
        let mut bits = Vec::new();
        bits.extend_from_slice(BitString::from_unsigned(time.into(), 32).as_bits());
        bits.extend_from_slice(&[false, false]);
        bits.extend_from_slice(BitString::from_unsigned(gps.into(), 32).as_bits());
        bits.extend_from_slice(BitString::from_unsigned(glonass.into(), 32).as_bits());
        for &sat in sats {
            bits.extend_from_slice(BitString::from_unsigned(sat.into(), 32).as_bits());
        }
        bits.extend(std::iter::repeat(false).take(trailing));
        assert_eq!(bits.len() % 4, 0);
        bits_to_hex(&bits)
    }

    /// 组装一条卫星记录
    fn sat(elevation: u8, snr: u8, id: u8, azimuth: u16, glonass: bool) -> u32 {
        (u32::from(elevation) << 24)
            | (u32::from(snr) << 16)
            | (u32::from(id & 0x1F) << 11)
            | (u32::from(azimuth & 0x1FF) << 2)
            | u32::from(glonass)
    }

    #[test]
    fn test_single_gps_slot() {
        let raw = build_payload(42, 0x8000_0000, 0, &[], 2);
        let data = GnssMetaData::decode(&raw).unwrap();
        assert_eq!(data.mission_time, 42);
        assert_eq!(data.gps_sats_in_use, BTreeSet::from([1]));
        assert!(data.glonass_sats_in_use.is_empty());
        assert!(data.sat_info.is_empty());
    }

    #[test]
    fn test_bitmaps() {
        let raw = build_payload(0, 0x0000_0003, 0x8000_0001, &[], 2);
        let data = GnssMetaData::decode(&raw).unwrap();
        assert_eq!(data.gps_sats_in_use, BTreeSet::from([31, 32]));
        assert_eq!(data.glonass_sats_in_use, BTreeSet::from([1, 32]));
    }

    #[test]
    fn test_satellite_records() {
        let raw = build_payload(
            7,
            0,
            0,
            &[sat(45, 38, 12, 270, false), sat(10, 20, 3, 511, true)],
            2,
        );
        let data = GnssMetaData::decode(&raw).unwrap();
        assert_eq!(data.sat_info.len(), 2);

        let gps = &data.sat_info[&12];
        assert_eq!(gps.elevation, 45);
        assert_eq!(gps.snr, 38);
        assert_eq!(gps.azimuth, 270);
        assert_eq!(gps.sat_type, SatelliteType::Gps);

        let glonass = &data.sat_info[&3];
        assert_eq!(glonass.azimuth, 511);
        assert_eq!(glonass.sat_type, SatelliteType::Glonass);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let raw = build_payload(
            0,
            0,
            0,
            &[sat(1, 2, 9, 100, false), sat(60, 40, 9, 200, true)],
            2,
        );
        let data = GnssMetaData::decode(&raw).unwrap();
        assert_eq!(data.sat_info.len(), 1);
        assert_eq!(
            data.sat_info[&9],
            SatelliteInfo {
                elevation: 60,
                snr: 40,
                id: 9,
                azimuth: 200,
                sat_type: SatelliteType::Glonass,
            }
        );
    }

    #[test]
    fn test_trailing_partial_record_discarded() {
        // 最后一条记录只有 2 + 28 = 30 位
        let raw = build_payload(0, 0, 0, &[sat(5, 5, 5, 5, false)], 30);
        let data = GnssMetaData::decode(&raw).unwrap();
        assert_eq!(data.sat_info.len(), 1);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            GnssMetaData::decode("000000000000000000000000"),
            Err(DecodeError::LengthMismatch {
                context: "gnss_meta",
                expected: 25,
                actual: 24
            })
        );
    }
}
