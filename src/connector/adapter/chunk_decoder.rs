use std::pin::Pin;

use futures_util::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::domain::RequestError;

/// Turn a stream of raw body chunks into a stream of UTF-8 text fragments.
///
/// Each non-empty chunk yields one fragment. Empty chunks are skipped. A
/// multi-byte character cut in half by the network is held back and emitted
/// with the following chunk. Invalid UTF-8, an incomplete character at the
/// end of the body, or a transport error yields one error and ends the stream.
pub fn decode_text_chunks<S, B, E>(chunks: S) -> impl Stream<Item = Result<String, RequestError>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<RequestError> + Send + 'static,
{
    let state = DecoderState {
        chunks: Box::pin(chunks),
        pending: Vec::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.finished {
            return None;
        }
        loop {
            match state.chunks.next().await {
                Some(Ok(bytes)) => match state.push(bytes.as_ref()) {
                    Ok(Some(text)) => return Some((Ok(text), state)),
                    Ok(None) => continue,
                    Err(e) => {
                        state.finished = true;
                        return Some((Err(e), state));
                    }
                },
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(e.into()), state));
                }
                None => {
                    state.finished = true;
                    if state.pending.is_empty() {
                        debug!("Chat stream finished");
                        return None;
                    }
                    let err = RequestError::decode(format!(
                        "stream ended inside a UTF-8 sequence ({} dangling bytes)",
                        state.pending.len()
                    ));
                    return Some((Err(err), state));
                }
            }
        }
    })
}

struct DecoderState<S> {
    chunks: Pin<Box<S>>,
    /// Bytes of an incomplete trailing character from the previous chunk.
    pending: Vec<u8>,
    finished: bool,
}

impl<S> DecoderState<S> {
    fn push(&mut self, bytes: &[u8]) -> Result<Option<String>, RequestError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        self.pending.extend_from_slice(bytes);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(RequestError::decode(format!("invalid UTF-8 in stream: {e}"))),
        };
        if valid_up_to == 0 {
            return Ok(None);
        }

        let rest = self.pending.split_off(valid_up_to);
        let complete = std::mem::replace(&mut self.pending, rest);
        String::from_utf8(complete)
            .map(Some)
            .map_err(|e| RequestError::decode(e.to_string()))
    }
}
