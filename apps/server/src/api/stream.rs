//! Live spot-price stream over `text/event-stream`.

use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio_stream::StreamExt;

use goldfolio_core::constants::STREAM_KEEPALIVE_SECS;
use goldfolio_core::market_data::PriceEvent;

use crate::main_lib::AppState;

#[derive(Serialize)]
struct PriceFrame {
    price: Decimal,
}

#[derive(Serialize)]
struct ErrorFrame {
    error: String,
}

/// One long-lived price stream session.
///
/// The broadcaster subscription moves into the response stream, so a
/// client disconnect drops the body, which drops the subscription, which
/// deregisters it - one release point for every disconnect path. Error
/// frames are informational; they never close the stream.
async fn stream_prices(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let subscription = state.broadcaster.subscribe();
    let updates = subscription.filter_map(|event| {
        let frame = match event {
            PriceEvent::Price(price) => SseEvent::default().json_data(PriceFrame { price }),
            PriceEvent::Error(error) => SseEvent::default().json_data(ErrorFrame { error }),
        };
        match frame {
            Ok(sse_event) => Some(Ok(sse_event)),
            Err(err) => {
                tracing::error!("Failed to serialize SSE frame: {}", err);
                None
            }
        }
    });

    // Open with a comment frame so clients see the channel is live before
    // the first poll result lands.
    let stream = tokio_stream::once(Ok(SseEvent::default().comment("connected"))).chain(updates);

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(STREAM_KEEPALIVE_SECS))
            .text("ping"),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stream", get(stream_prices))
}
