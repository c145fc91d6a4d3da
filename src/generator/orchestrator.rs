use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::generator::fallback::fallback_responses;
use crate::generator::parser::{parse_comebacks, RESPONSE_COUNT};
use crate::generator::prompt::{build_system_prompt, build_user_prompt};
use crate::generator::GenerationRequest;
use crate::llm::chat::call_chat_completion;
use crate::llm::image::{placeholder_meme_url, try_generate_meme};
use crate::state::AppState;
use crate::storage::models::ComebackRecord;

pub const DISABLED_MEME_URLS: [&str; RESPONSE_COUNT] = [
    "https://via.placeholder.com/300x300/6b7280/ffffff?text=表情包生成已关闭",
    "https://via.placeholder.com/300x300/ef4444/ffffff?text=开启后可生成",
    "https://via.placeholder.com/300x300/10b981/ffffff?text=AI表情包",
];

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Text,
    Image { index: usize },
}

#[derive(Debug, Clone)]
pub enum GenerationEvent {
    TextReady { responses: Vec<String> },
    ImageReady { index: usize, url: String },
    // Non-blocking notice that a stage degraded to fallback content.
    Failed { stage: GenerationStage },
    Completed { record: ComebackRecord },
}

pub type EventSender = mpsc::Sender<GenerationEvent>;

// Always resolves to exactly RESPONSE_COUNT strings; a failed completion
// call degrades to the canned template bank instead of erroring.
pub async fn generate_comebacks(config: &Config, request: &GenerationRequest) -> Vec<String> {
    generate_comebacks_detailed(config, request).await.0
}

async fn generate_comebacks_detailed(
    config: &Config,
    request: &GenerationRequest,
) -> (Vec<String>, bool) {
    let system_prompt = build_system_prompt(request);
    let user_prompt = build_user_prompt(request);

    match call_chat_completion(config, &system_prompt, &user_prompt).await {
        Ok(raw) => (parse_comebacks(&raw, request.style), false),
        Err(err) => {
            warn!("Comeback generation failed, using template bank: {err}");
            (
                fallback_responses(&request.original_text, request.style),
                true,
            )
        }
    }
}

// Text completes and is announced before any image work starts; images go
// out one at a time in index order. Resolves only once every slot is
// settled, so `meme_urls` on the returned record is final.
pub async fn create_comeback_response(
    state: &AppState,
    request: GenerationRequest,
    events: Option<&EventSender>,
) -> ComebackRecord {
    let epoch = state.begin_generation();
    run_generation(state, epoch, request, events).await
}

async fn run_generation(
    state: &AppState,
    epoch: u64,
    request: GenerationRequest,
    events: Option<&EventSender>,
) -> ComebackRecord {
    info!(
        "Generating comebacks: style={} intensity={} language={} images={}",
        request.style.label(),
        request.intensity,
        request.language.label(),
        request.enable_image_generation
    );

    let (responses, text_fell_back) = generate_comebacks_detailed(&state.config, &request).await;

    if text_fell_back {
        emit(
            state,
            epoch,
            events,
            GenerationEvent::Failed {
                stage: GenerationStage::Text,
            },
        )
        .await;
    }
    emit(
        state,
        epoch,
        events,
        GenerationEvent::TextReady {
            responses: responses.clone(),
        },
    )
    .await;

    let meme_urls = if request.enable_image_generation {
        generate_memes(state, epoch, &request, &responses, events).await
    } else {
        let urls: Vec<String> = DISABLED_MEME_URLS.iter().map(|url| url.to_string()).collect();
        for (index, url) in urls.iter().enumerate() {
            emit(
                state,
                epoch,
                events,
                GenerationEvent::ImageReady {
                    index,
                    url: url.clone(),
                },
            )
            .await;
        }
        urls
    };

    let record = ComebackRecord::new(
        request.original_text,
        responses,
        meme_urls,
        request.style,
        request.intensity,
        request.language,
    );

    if state.is_current(epoch) {
        if let Err(err) = state.store.add_to_history(&record).await {
            warn!("Failed to persist comeback record: {err}");
        }
    } else {
        debug!("Discarding stale generation result (epoch {epoch})");
    }

    emit(
        state,
        epoch,
        events,
        GenerationEvent::Completed {
            record: record.clone(),
        },
    )
    .await;

    record
}

async fn generate_memes(
    state: &AppState,
    epoch: u64,
    request: &GenerationRequest,
    responses: &[String],
    events: Option<&EventSender>,
) -> Vec<String> {
    let mut urls = Vec::with_capacity(RESPONSE_COUNT);

    for (index, response) in responses.iter().take(RESPONSE_COUNT).enumerate() {
        if index > 0 {
            // breathing room between calls to stay under upstream limits
            tokio::time::sleep(Duration::from_millis(state.config.image_request_delay_ms)).await;
        }

        let url = match try_generate_meme(&state.config, response, request.style, index).await {
            Ok(url) => url,
            Err(err) => {
                warn!("Meme {} generation failed, using placeholder: {err}", index + 1);
                emit(
                    state,
                    epoch,
                    events,
                    GenerationEvent::Failed {
                        stage: GenerationStage::Image { index },
                    },
                )
                .await;
                placeholder_meme_url(index)
            }
        };

        emit(
            state,
            epoch,
            events,
            GenerationEvent::ImageReady {
                index,
                url: url.clone(),
            },
        )
        .await;
        urls.push(url);
    }

    while urls.len() < RESPONSE_COUNT {
        let index = urls.len();
        let url = placeholder_meme_url(index);
        emit(
            state,
            epoch,
            events,
            GenerationEvent::ImageReady {
                index,
                url: url.clone(),
            },
        )
        .await;
        urls.push(url);
    }

    urls
}

// Spawns the full pipeline and hands back the event stream; the Completed
// event carries the final record.
pub fn spawn_generation(
    state: AppState,
    request: GenerationRequest,
) -> mpsc::Receiver<GenerationEvent> {
    let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        create_comeback_response(&state, request, Some(&sender)).await;
    });
    receiver
}

async fn emit(state: &AppState, epoch: u64, events: Option<&EventSender>, event: GenerationEvent) {
    if !state.is_current(epoch) {
        debug!("Dropping event from stale generation (epoch {epoch})");
        return;
    }
    if let Some(sender) = events {
        // a dropped receiver only means nobody is watching anymore
        let _ = sender.send(event).await;
    }
}
