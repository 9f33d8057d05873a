/// One streaming stage: consumes a line stream, produces a line stream.
///
/// `push` handles one input line; `finish` flushes whatever the stage still
/// holds at end-of-input (pending duplicate runs, limit warnings).
pub trait LineTransform {
    fn push(&mut self, line: &str, out: &mut Vec<String>);

    fn finish(&mut self, _out: &mut Vec<String>) {}
}

/// Ordered composition of transforms. Stage order is data, not call-site
/// convention, so the per-mode orderings can be asserted structurally.
pub struct Pipeline {
    stages: Vec<Box<dyn LineTransform>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn LineTransform>>) -> Self {
        Self { stages }
    }

    /// Feed one line through every stage in order.
    pub fn push(&mut self, line: &str, out: &mut Vec<String>) {
        self.feed_from(0, line, out);
    }

    /// Flush every stage in order. Lines a stage emits at finish still flow
    /// through the stages after it.
    pub fn finish(&mut self, out: &mut Vec<String>) {
        for index in 0..self.stages.len() {
            let mut pending = Vec::new();
            self.stages[index].finish(&mut pending);
            for line in &pending {
                self.feed_from(index + 1, line, out);
            }
        }
    }

    fn feed_from(&mut self, start: usize, line: &str, out: &mut Vec<String>) {
        if start >= self.stages.len() {
            out.push(line.to_string());
            return;
        }
        let mut current = vec![line.to_string()];
        for stage in &mut self.stages[start..] {
            let mut next = Vec::new();
            for line in &current {
                stage.push(line, &mut next);
            }
            current = next;
        }
        out.extend(current);
    }
}
