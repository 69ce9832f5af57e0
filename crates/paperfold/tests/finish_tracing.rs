//! Tracing contract of the orchestrator: one `paperfold.finish` span per
//! state change, and an error event for rejected commands.

use std::sync::{Arc, Mutex};

use paperfold::prelude::*;
use paperfold::{PackedRgba, Raster};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

struct Solid(Size);

impl Renderable for Solid {
    fn size(&self) -> Size {
        self.0
    }

    fn draw(&self, target: &mut Raster, _scale: f64) {
        target.fill_rect(0, 0, target.width(), target.height(), PackedRgba::WHITE);
    }
}

#[derive(Default)]
struct TraceState {
    finish_spans: usize,
    finished_events: usize,
    rejected_events: usize,
}

struct FinishCapture {
    state: Arc<Mutex<TraceState>>,
}

impl<S> Layer<S> for FinishCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() == "paperfold.finish" {
            self.state.lock().expect("trace lock").finish_spans += 1;
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        let mut state = self.state.lock().expect("trace lock");
        match msg.message.as_deref() {
            Some("fold finished") => state.finished_events += 1,
            Some("no content attached to edge") if *event.metadata().level() == tracing::Level::ERROR => {
                state.rejected_events += 1;
            }
            _ => {}
        }
    }
}

fn capture() -> (Arc<Mutex<TraceState>>, tracing::subscriber::DefaultGuard) {
    let state = Arc::new(Mutex::new(TraceState::default()));
    let subscriber = tracing_subscriber::registry().with(FinishCapture {
        state: Arc::clone(&state),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    (state, guard)
}

#[test]
fn finish_span_per_state_change() {
    let (state, _guard) = capture();

    let mut fold = PaperFold::new(Size::new(320.0, 480.0));
    fold.set_left_content(Box::new(Solid(Size::new(80.0, 480.0))), 2, 0.0)
        .expect("left");
    fold.unfold_left(false, None).expect("left");
    // Already there: no second finish.
    fold.unfold_left(false, None).expect("left again");
    fold.restore_to_center(true, None).expect("restore");
    while fold.tick() {}

    let snapshot = state.lock().expect("trace lock");
    assert_eq!(snapshot.finish_spans, 2, "expected LeftUnfolded then Default");
    assert_eq!(snapshot.finished_events, 2);
    assert_eq!(snapshot.rejected_events, 0);
}

#[test]
fn rejected_command_logs_error() {
    let (state, _guard) = capture();

    let mut fold = PaperFold::new(Size::new(320.0, 480.0));
    assert!(fold.unfold_bottom(true, None).is_err());

    let snapshot = state.lock().expect("trace lock");
    assert_eq!(snapshot.rejected_events, 1);
    assert_eq!(snapshot.finish_spans, 0);
}
