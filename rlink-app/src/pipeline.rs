//! 解码管道
//!
//! 三个阶段各自运行在独立任务中，通过有界队列串联：
//! 读取 → 解码 → 输出。单个解码任务按到达顺序处理载荷。

use std::fmt;

use log::{debug, info, warn};
use rlink_codec::{DecodeError, DecoderConfig, Packet, PacketKind};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::config::AppConfig;

/// 待解码的原始载荷
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub line_no: usize,
    pub kind: PacketKind,
    pub hex: String,
}

/// 管道统计信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub received: u64,
    pub decoded: u64,
    pub rejected: u64,
}

/// 输入行错误，只跳过该行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 不是 `<包类型> <十六进制载荷>` 两段格式
    Malformed { line_no: usize },
    /// 行内容不是有效的UTF-8
    Encoding { line_no: usize },
    /// 包类型无法识别
    UnknownKind { line_no: usize, source: DecodeError },
}

impl InputError {
    pub fn line_no(&self) -> usize {
        match self {
            InputError::Malformed { line_no }
            | InputError::Encoding { line_no }
            | InputError::UnknownKind { line_no, .. } => *line_no,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Malformed { line_no } => {
                write!(f, "line {line_no}: expected `<kind> <hex>`")
            }
            InputError::Encoding { line_no } => write!(f, "line {line_no}: invalid UTF-8"),
            InputError::UnknownKind { line_no, source } => write!(f, "line {line_no}: {source}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::UnknownKind { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 解析一行输入
///
/// 格式为 `<包类型> <十六进制载荷>`；空行和 `#` 开头的注释行返回 `Ok(None)`
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<RawPayload>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let (Some(kind), Some(hex), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::Malformed { line_no });
    };

    let kind = kind
        .parse::<PacketKind>()
        .map_err(|source| InputError::UnknownKind { line_no, source })?;

    Ok(Some(RawPayload {
        line_no,
        kind,
        hex: hex.to_string(),
    }))
}

/// 将解码结果转换为以子类型名为键的JSON对象
pub fn packet_to_json(packet: &Packet) -> serde_json::Result<Value> {
    let mut object = Map::new();
    object.insert(packet.kind().name().to_string(), serde_json::to_value(packet)?);
    Ok(Value::Object(object))
}

/// 读取阶段：逐行读取并送入解码队列，返回 (有效行数, 格式错误行数)
///
/// 按字节读取行，非UTF-8行记为格式错误，不中断读取
async fn read_stage<R>(mut reader: R, tx: mpsc::Sender<RawPayload>) -> anyhow::Result<(u64, u64)>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut received = 0u64;
    let mut malformed = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_line(line_no, line),
            Err(_) => Err(InputError::Encoding { line_no }),
        };
        match parsed {
            Ok(Some(payload)) => {
                received += 1;
                if tx.send(payload).await.is_err() {
                    warn!("Decoder stage closed, stopping reader");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                malformed += 1;
                warn!("Skipping malformed input: {e}");
            }
        }
    }

    info!("Reader stage finished after {line_no} lines");
    Ok((received, malformed))
}

/// 解码阶段：返回 (成功数, 失败数)
async fn decode_stage(
    mut rx: mpsc::Receiver<RawPayload>,
    tx: mpsc::Sender<Packet>,
    config: DecoderConfig,
) -> (u64, u64) {
    let mut decoded = 0u64;
    let mut rejected = 0u64;

    while let Some(payload) = rx.recv().await {
        match Packet::decode(payload.kind, &payload.hex, &config) {
            Ok(packet) => {
                debug!(
                    "line {}: decoded {} at mission time {}",
                    payload.line_no,
                    payload.kind,
                    packet.mission_time()
                );
                decoded += 1;
                if tx.send(packet).await.is_err() {
                    warn!("Writer stage closed, stopping decoder");
                    break;
                }
            }
            Err(e) => {
                rejected += 1;
                warn!(
                    "line {}: rejected {} payload ({}): {e}",
                    payload.line_no,
                    payload.kind,
                    e.kind()
                );
            }
        }
    }

    (decoded, rejected)
}

/// 输出阶段：每个数据包输出一行JSON（pretty模式下为多行）
async fn write_stage<W>(
    mut rx: mpsc::Receiver<Packet>,
    mut writer: W,
    pretty: bool,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(packet) = rx.recv().await {
        let value = packet_to_json(&packet)?;
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        writer.write_all(text.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}

/// 运行完整管道，直到输入耗尽且所有队列排空
///
/// 任一阶段失败时仍会等待其余阶段结束后再返回错误
pub async fn run_pipeline<R, W>(
    reader: R,
    writer: W,
    config: &AppConfig,
) -> anyhow::Result<PipelineStats>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (payload_tx, payload_rx) = mpsc::channel(config.queue_capacity);
    let (packet_tx, packet_rx) = mpsc::channel(config.queue_capacity);

    info!(
        "Starting pipeline (queue capacity {})",
        config.queue_capacity
    );

    let reader_task = tokio::spawn(read_stage(reader, payload_tx));
    let decoder_task = tokio::spawn(decode_stage(
        payload_rx,
        packet_tx,
        config.decoder.clone(),
    ));
    let writer_task = tokio::spawn(write_stage(packet_rx, writer, config.pretty));

    let reader_result = reader_task.await;
    let decoder_result = decoder_task.await;
    let writer_result = writer_task.await;

    let (received, malformed) = reader_result??;
    let (decoded, rejected) = decoder_result?;
    writer_result??;

    let stats = PipelineStats {
        received: received + malformed,
        decoded,
        rejected: rejected + malformed,
    };
    info!(
        "Pipeline finished: received={}, decoded={}, rejected={}",
        stats.received, stats.decoded, stats.rejected
    );
    Ok(stats)
}
