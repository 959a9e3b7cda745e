//! 运行事件
//!
//! 生成过程通过事件通知外部（界面、命令行），外部只读事件，不触碰流水线状态

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// 流水线事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// 进度百分比（0-100，单调不减）
    Progress { percent: u8 },
    /// 状态文本
    Status { message: String },
    /// 某个主题的文章已保存
    EssayCompleted { topic: String },
    /// 运行结束（每次运行恰好一次）
    Finished { success: bool, message: String },
}

/// 事件发送端
///
/// `Default` 得到的发送端不发送任何事件；接收端被丢弃后发送会被静默忽略，生成过程不因外部退出而失败
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<PipelineEvent>>,
}

impl EventSink {
    pub fn new(tx: UnboundedSender<PipelineEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn progress(&self, percent: u8) {
        self.emit(PipelineEvent::Progress { percent });
    }

    pub fn status(&self, message: impl Into<String>) {
        self.emit(PipelineEvent::Status {
            message: message.into(),
        });
    }

    pub fn essay_completed(&self, topic: impl Into<String>) {
        self.emit(PipelineEvent::EssayCompleted {
            topic: topic.into(),
        });
    }

    pub fn finished(&self, success: bool, message: impl Into<String>) {
        self.emit(PipelineEvent::Finished {
            success,
            message: message.into(),
        });
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                debug!("事件接收端已关闭，忽略事件");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_delivered_in_order() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let sink = EventSink::new(tx);

        sink.status("старт");
        sink.progress(50);
        sink.finished(true, "готово");

        assert_eq!(
            rx.try_recv().unwrap(),
            PipelineEvent::Status {
                message: "старт".to_string()
            }
        );
        assert_eq!(rx.try_recv().unwrap(), PipelineEvent::Progress { percent: 50 });
        assert!(matches!(
            rx.try_recv().unwrap(),
            PipelineEvent::Finished { success: true, .. }
        ));
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        EventSink::new(tx).status("никто не слушает");
        EventSink::default().progress(10);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(PipelineEvent::Progress { percent: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "progress", "percent": 7}));
    }
}
