//! 无线电载荷仿真器
//!
//! 生成与解码器线格式一致的高度包：温度在20~100°C之间往返漂移，
//! 高度每包随机上升0~4米，包间隔随机0~2秒

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rlink_core::PacketKind;

const TEMP_MIN_C: f64 = 20.0;
const TEMP_MAX_C: f64 = 100.0;
const BASE_PRESSURE: f64 = 87181.0;

/// 高度包仿真器
pub struct PayloadEmulator {
    rng: StdRng,
    mission_time_ms: u32,
    altitude_m: f64,
    temperature_c: f64,
    going_up: bool,
}

impl PayloadEmulator {
    /// 使用当前时间作为种子
    pub fn new() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::with_seed(seed)
    }

    /// 使用指定种子创建（用于可重复测试）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mission_time_ms: 0,
            altitude_m: 0.0,
            temperature_c: 22.0,
            going_up: true,
        }
    }

    /// 生成 [0, max) 范围内的随机浮点数
    fn uniform(&mut self, max: f64) -> f64 {
        let mut buf = [0u8; 8];
        self.rng.fill_bytes(&mut buf);
        // 取高53位构造 [0, 1) 的均匀分布
        let unit = (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64;
        unit * max
    }

    /// 生成下一个高度包的十六进制载荷
    pub fn next_payload(&mut self) -> String {
        let drift = self.uniform(1000.0).floor() / 500.0;
        if self.going_up {
            self.temperature_c += drift;
        } else {
            self.temperature_c -= drift;
        }
        if self.temperature_c > TEMP_MAX_C {
            self.going_up = false;
        } else if self.temperature_c < TEMP_MIN_C {
            self.going_up = true;
        }

        self.altitude_m += self.uniform(4.0);
        self.mission_time_ms = self
            .mission_time_ms
            .saturating_add(self.uniform(2000.0) as u32);

        let pressure = (BASE_PRESSURE + self.temperature_c * 50.0) as u32;
        let temperature = (self.temperature_c * 1000.0) as u32;
        let altitude = (self.altitude_m * 1000.0) as u32;

        format!(
            "{:08X}{:08X}{:08X}{:08X}",
            self.mission_time_ms, pressure, temperature, altitude
        )
    }

    /// 生成一行管道输入：`<包类型> <载荷>`
    pub fn next_line(&mut self) -> String {
        format!("{} {}", PacketKind::Altitude, self.next_payload())
    }

    /// 生成 `count` 行输入文本
    pub fn generate_lines(&mut self, count: usize) -> String {
        let mut text = String::new();
        for _ in 0..count {
            text.push_str(&self.next_line());
            text.push('\n');
        }
        text
    }
}

impl Default for PayloadEmulator {
    fn default() -> Self {
        Self::new()
    }
}
