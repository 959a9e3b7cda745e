/// 运行进度
///
/// `total_steps = 主题数 × (章节数 + 1)`，每生成一个部分前进一步
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    completed: usize,
    total: usize,
    percent: u8,
}

impl ProgressTracker {
    pub fn new(total_steps: usize) -> Self {
        Self {
            completed: 0,
            total: total_steps,
            percent: 0,
        }
    }

    /// 前进一步，返回新的百分比
    ///
    /// 百分比单调不减，最多为 100（大纲多出的部分不会让进度溢出）
    pub fn advance(&mut self) -> u8 {
        self.completed += 1;
        let percent = if self.total == 0 {
            100
        } else {
            (self.completed * 100 / self.total).min(100) as u8
        };
        self.percent = self.percent.max(percent);
        self.percent
    }
}
