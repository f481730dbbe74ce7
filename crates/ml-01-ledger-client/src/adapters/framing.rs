//! Length-prefixed frame I/O over any async byte stream.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::codec::{frame, FRAME_HEADER_LEN};
use crate::domain::{LedgerError, Stage};

/// Write `payload` as one frame and flush.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), LedgerError>
where
    W: AsyncWrite + Unpin,
{
    let framed = frame(payload)?;
    writer.write_all(&framed).await.map_err(send_error)?;
    writer.flush().await.map_err(send_error)
}

/// Read one frame, refusing anything larger than `max_frame_bytes`.
pub async fn read_frame<R>(reader: &mut R, max_frame_bytes: usize) -> Result<Vec<u8>, LedgerError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; FRAME_HEADER_LEN];
    reader
        .read_exact(&mut header)
        .await
        .map_err(receive_error)?;

    let size = u32::from_be_bytes(header) as usize;
    if size > max_frame_bytes {
        return Err(LedgerError::FrameTooLarge {
            size,
            limit: max_frame_bytes,
        });
    }

    let mut payload = vec![0u8; size];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(receive_error)?;
    Ok(payload)
}

fn send_error(e: std::io::Error) -> LedgerError {
    LedgerError::Network {
        stage: Stage::Send,
        reason: e.to_string(),
    }
}

fn receive_error(e: std::io::Error) -> LedgerError {
    LedgerError::Network {
        stage: Stage::Receive,
        reason: e.to_string(),
    }
}
