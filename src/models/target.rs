use std::collections::HashSet;

/// How a redeploy is requested from the deploy provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTrigger {
    /// A deploy hook URL, called with a bare `POST`.
    Hook { url: String },
    /// A service id, deployed through the authenticated provider API.
    Service { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub app_url: String,
    pub deploy: DeployTrigger,
}

/// The static, ordered set of monitored targets.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.name.as_str()) {
                return Err(format!("Duplicate project name: {}", target.name));
            }
        }

        Ok(Self { targets })
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
