//! Generic optimizer panel
//!
//! Binds a field schema to a typed flow. `submit` validates the form and
//! dispatches the flow on the runtime; settlements come back over a channel
//! owned by the panel and are applied by `poll` on the UI thread. Each
//! submission carries a sequence number and only the settlement matching
//! the latest submission is applied, so a resubmit supersedes whatever is
//! still in flight.

use crate::flows::{Flow, ResultRow};
use crate::genai::{GenAiError, SharedTextModel};
use crate::state::{FormState, Notify, Outcome, ToastKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Toast shown when a flow fails, matching for every console
const FAILURE_TITLE: &str = "Error";
const FAILURE_MESSAGE: &str = "Failed to get optimization results. Please try again.";

/// Object-safe view of a panel, so the app can hold consoles with
/// different flow types in one registry
pub trait Console {
    fn name(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn blurb(&self) -> &'static str;
    fn form(&self) -> &FormState;
    fn form_mut(&mut self) -> &mut FormState;
    /// A request is in flight
    fn is_busy(&self) -> bool;
    /// The last request failed and nothing newer is showing
    fn is_failed(&self) -> bool;
    /// Rows of the last successful result, if one is showing
    fn result_rows(&self) -> Option<Vec<ResultRow>>;
    fn submit(&mut self, model: &SharedTextModel);
    fn poll(&mut self, notify: &mut dyn Notify);

    /// Plain-text rendering of the result, for the clipboard
    fn result_text(&self) -> Option<String> {
        self.result_rows().map(|rows| {
            rows.iter()
                .map(|row| format!("{}: {}", row.label, row.value))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

struct Settlement<T> {
    seq: u64,
    request_id: Uuid,
    result: Result<T, GenAiError>,
}

pub struct OptimizerPanel<F: Flow> {
    flow: Arc<F>,
    form: FormState,
    outcome: Outcome<F::Output>,
    next_seq: u64,
    tx: mpsc::UnboundedSender<Settlement<F::Output>>,
    rx: mpsc::UnboundedReceiver<Settlement<F::Output>>,
}

impl<F: Flow> OptimizerPanel<F> {
    pub fn new(flow: F) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let flow = Arc::new(flow);
        Self {
            form: FormState::new(flow.schema()),
            flow,
            outcome: Outcome::default(),
            next_seq: 0,
            tx,
            rx,
        }
    }

    fn apply(&mut self, settlement: Settlement<F::Output>, notify: &mut dyn Notify) {
        let flow = self.flow.name();
        match settlement.result {
            Ok(output) => {
                if self.outcome.settle_success(settlement.seq, output) {
                    debug!(flow, request_id = %settlement.request_id, "flow settled");
                } else {
                    debug!(flow, request_id = %settlement.request_id, "stale success dropped");
                }
            }
            Err(error) => {
                if self.outcome.settle_failure(settlement.seq) {
                    warn!(flow, request_id = %settlement.request_id, %error, "flow failed");
                    notify.notify(ToastKind::Error, FAILURE_TITLE, FAILURE_MESSAGE);
                } else {
                    debug!(flow, request_id = %settlement.request_id, "stale failure dropped");
                }
            }
        }
    }
}

impl<F: Flow> Console for OptimizerPanel<F> {
    fn name(&self) -> &'static str {
        self.flow.name()
    }

    fn title(&self) -> &'static str {
        self.flow.title()
    }

    fn blurb(&self) -> &'static str {
        self.flow.blurb()
    }

    fn form(&self) -> &FormState {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    fn is_busy(&self) -> bool {
        self.outcome.is_pending()
    }

    fn is_failed(&self) -> bool {
        self.outcome.is_failure()
    }

    fn result_rows(&self) -> Option<Vec<ResultRow>> {
        self.outcome.success().map(|output| self.flow.present(output))
    }

    /// Validate and dispatch. Invalid input surfaces field errors and
    /// leaves the outcome untouched; valid input dispatches the flow
    /// exactly once.
    fn submit(&mut self, model: &SharedTextModel) {
        let Some(values) = self.form.validate() else {
            debug!(
                flow = self.flow.name(),
                errors = self.form.error_count(),
                "submit blocked by validation"
            );
            return;
        };
        let input = self.flow.build_input(&values);
        self.next_seq += 1;
        let seq = self.next_seq;
        self.outcome.begin(seq);

        let request_id = Uuid::new_v4();
        debug!(flow = self.flow.name(), %request_id, seq, "dispatching flow");

        let flow = Arc::clone(&self.flow);
        let model = Arc::clone(model);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = flow.run(model.as_ref(), input).await;
            // Send fails only when the panel is gone, settlement has
            // nowhere to go then
            let _ = tx.send(Settlement {
                seq,
                request_id,
                result,
            });
        });
    }

    /// Apply any settlements that arrived since the last poll
    fn poll(&mut self, notify: &mut dyn Notify) {
        while let Ok(settlement) = self.rx.try_recv() {
            self.apply(settlement, notify);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::Quality;
    use crate::genai::{MockTextModel, TextModel};
    use crate::state::MockNotify;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    const QUALITY_REPLY: &str =
        r#"{"qualityAssessment": "stable", "recommendedCorrections": "none"}"#;

    fn panel() -> OptimizerPanel<Quality> {
        OptimizerPanel::new(Quality)
    }

    fn shared(model: MockTextModel) -> SharedTextModel {
        Arc::new(model)
    }

    fn succeeding_model(reply: &str) -> SharedTextModel {
        let reply = reply.to_string();
        let mut model = MockTextModel::new();
        model
            .expect_generate()
            .times(1)
            .returning(move |_| Ok(reply.clone()));
        shared(model)
    }

    fn failing_model() -> SharedTextModel {
        let mut model = MockTextModel::new();
        model
            .expect_generate()
            .times(1)
            .returning(|_| Err(GenAiError::EmptyReply));
        shared(model)
    }

    /// Model that holds its reply until the gate fires
    struct GatedModel {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        reply: Mutex<Option<Result<String, GenAiError>>>,
    }

    impl GatedModel {
        fn new(reply: Result<String, GenAiError>) -> (SharedTextModel, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let model = Arc::new(Self {
                gate: Mutex::new(Some(rx)),
                reply: Mutex::new(Some(reply)),
            });
            (model, tx)
        }
    }

    #[async_trait]
    impl TextModel for GatedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.reply.lock().unwrap().take().unwrap()
        }
    }

    /// Let spawned settlements land and get applied
    async fn settle_ticks(panel: &mut OptimizerPanel<Quality>, notify: &mut dyn Notify) {
        for _ in 0..20 {
            tokio::task::yield_now().await;
            panel.poll(notify);
        }
    }

    fn clear_required_field(panel: &mut OptimizerPanel<Quality>) {
        let field = panel.form_mut().active_field_mut().unwrap();
        while !field.raw().is_empty() {
            field.pop_char();
        }
    }

    #[tokio::test]
    async fn test_invalid_submit_never_invokes_flow() {
        let mut panel = panel();
        clear_required_field(&mut panel);

        // No expectations set: any generate call would fail the test
        let model = shared(MockTextModel::new());
        panel.submit(&model);

        assert!(!panel.is_busy());
        assert!(panel.result_rows().is_none());
        assert_eq!(panel.form().error_count(), 1);
        assert_eq!(
            panel.form().fields()[0].error(),
            Some("Real-time Input Data is required.")
        );
    }

    #[tokio::test]
    async fn test_valid_submit_dispatches_exactly_once_and_settles() {
        let mut panel = panel();
        let model = succeeding_model(QUALITY_REPLY);
        let mut notify = MockNotify::new();

        panel.submit(&model);
        assert!(panel.is_busy());
        assert!(panel.result_rows().is_none());

        settle_ticks(&mut panel, &mut notify).await;
        assert!(!panel.is_busy());
        let rows = panel.result_rows().expect("result should be shown");
        assert_eq!(rows[0].label, "Quality Assessment");
        assert_eq!(rows[0].value, "stable");
    }

    #[tokio::test]
    async fn test_failure_notifies_exactly_once() {
        let mut panel = panel();
        let model = failing_model();
        let mut notify = MockNotify::new();
        notify
            .expect_notify()
            .times(1)
            .withf(|kind, title, message| {
                *kind == ToastKind::Error
                    && title == "Error"
                    && message == "Failed to get optimization results. Please try again."
            })
            .return_const(());

        panel.submit(&model);
        settle_ticks(&mut panel, &mut notify).await;

        assert!(!panel.is_busy());
        assert!(panel.result_rows().is_none());
    }

    #[tokio::test]
    async fn test_validation_errors_clear_on_edit_and_resubmit_succeeds() {
        let mut panel = panel();
        clear_required_field(&mut panel);
        panel.submit(&shared(MockTextModel::new()));
        assert_eq!(panel.form().error_count(), 1);

        panel
            .form_mut()
            .active_field_mut()
            .unwrap()
            .push_char('x');
        assert_eq!(panel.form().error_count(), 0);

        let model = succeeding_model(QUALITY_REPLY);
        let mut notify = MockNotify::new();
        panel.submit(&model);
        settle_ticks(&mut panel, &mut notify).await;
        assert!(panel.result_rows().is_some());
    }

    #[tokio::test]
    async fn test_resubmit_supersedes_and_stale_success_is_dropped() {
        let mut panel = panel();
        let mut notify = MockNotify::new();
        let (slow, gate) = GatedModel::new(Ok(
            r#"{"qualityAssessment": "old", "recommendedCorrections": "old"}"#.to_string(),
        ));

        panel.submit(&slow);
        assert!(panel.is_busy());
        panel.submit(&succeeding_model(QUALITY_REPLY));
        assert!(panel.is_busy());

        settle_ticks(&mut panel, &mut notify).await;
        assert_eq!(panel.result_rows().unwrap()[0].value, "stable");

        // First request finishes late, its result must not replace the
        // newer one
        let _ = gate.send(());
        settle_ticks(&mut panel, &mut notify).await;
        assert_eq!(panel.result_rows().unwrap()[0].value, "stable");
    }

    #[tokio::test]
    async fn test_stale_failure_is_dropped_without_notification() {
        let mut panel = panel();
        // Any notify call panics the test
        let mut notify = MockNotify::new();
        let (slow, gate) = GatedModel::new(Err(GenAiError::EmptyReply));

        panel.submit(&slow);
        panel.submit(&succeeding_model(QUALITY_REPLY));
        settle_ticks(&mut panel, &mut notify).await;
        assert_eq!(panel.result_rows().unwrap()[0].value, "stable");

        let _ = gate.send(());
        settle_ticks(&mut panel, &mut notify).await;
        assert!(panel.result_rows().is_some());
    }

    #[tokio::test]
    async fn test_new_submission_clears_shown_result() {
        let mut panel = panel();
        let mut notify = MockNotify::new();

        panel.submit(&succeeding_model(QUALITY_REPLY));
        settle_ticks(&mut panel, &mut notify).await;
        assert!(panel.result_rows().is_some());

        let (slow, _gate) = GatedModel::new(Ok(QUALITY_REPLY.to_string()));
        panel.submit(&slow);
        assert!(panel.is_busy());
        assert!(panel.result_rows().is_none());
    }

    #[tokio::test]
    async fn test_result_text_joins_rows() {
        let mut panel = panel();
        let mut notify = MockNotify::new();
        panel.submit(&succeeding_model(QUALITY_REPLY));
        settle_ticks(&mut panel, &mut notify).await;

        let text = panel.result_text().unwrap();
        assert_eq!(
            text,
            "Quality Assessment: stable\nRecommended Corrections: none"
        );
    }
}
