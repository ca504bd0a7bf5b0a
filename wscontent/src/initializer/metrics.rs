use wscontent_shared::InitSource;

#[derive(Debug, Clone)]
pub struct ChildMetrics {
    pub index: usize,
    pub name: String,
    pub duration_ms: u128,
    pub source: InitSource,
}

/// Timings of one composite run, one entry per child that succeeded.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    pub total_duration_ms: u128,
    pub children: Vec<ChildMetrics>,
}

impl RunMetrics {
    pub fn child_duration_ms(&self, name: &str) -> Option<u128> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| child.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_duration_lookup() {
        let metrics = RunMetrics {
            total_duration_ms: 30,
            children: vec![
                ChildMetrics {
                    index: 0,
                    name: "git".into(),
                    duration_ms: 20,
                    source: InitSource::FromVersionControl,
                },
                ChildMetrics {
                    index: 1,
                    name: "backup".into(),
                    duration_ms: 10,
                    source: InitSource::FromBackup,
                },
            ],
        };

        assert_eq!(metrics.child_duration_ms("backup"), Some(10));
        assert_eq!(metrics.child_duration_ms("download"), None);
    }
}
