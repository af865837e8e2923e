use tokio::sync::broadcast;

/// 管道事件
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineEvent {
    TranscriptNormalized {
        kept: usize,
        skipped: usize,
    },
    MessageClassified {
        processed: usize,
        total: usize,
    },
    ClassificationFallback {
        processed: usize,
        total: usize,
        reason: String,
    },
    AnalysisComplete {
        total: usize,
        fallbacks: usize,
    },
}

pub struct EventBus {
    sender: broadcast::Sender<PipelineEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: PipelineEvent) {
        tracing::trace!("[EventBus] Publishing event: {:?}", event);
        // 没有订阅者时发送失败，忽略即可
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
