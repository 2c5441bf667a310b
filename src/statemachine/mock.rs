use super::{Executor, ExecutorError, StateMachine, StateName};

/// Подставной исполнитель для тестов зависимого кода:
/// автомат не трогает, отдаёт заранее заданную трассу и результат.
pub struct MockExecutor<M: StateMachine> {
    name: String,
    scripted: Vec<M::State>,
    nodes: Vec<M::State>,
    fail: bool,
}

impl<M: StateMachine> MockExecutor<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripted: Vec::new(),
            nodes: Vec::new(),
            fail: false,
        }
    }

    /// Трасса, которую вернёт `execute`.
    pub fn with_nodes(mut self, nodes: Vec<M::State>) -> Self {
        self.scripted = nodes;
        self
    }

    /// `execute` завершится ошибкой на последнем состоянии трассы.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl<M: StateMachine> Executor<M> for MockExecutor<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, _machine: &mut M) -> Result<(), ExecutorError<M::Error>> {
        self.nodes = self.scripted.clone();
        if self.fail {
            let state = self.nodes.last().map(|s| s.name()).unwrap_or("none");
            return Err(ExecutorError::Halted {
                machine: self.name.clone(),
                state,
            });
        }
        Ok(())
    }

    fn nodes(&self) -> &[M::State] {
        &self.nodes
    }
}
