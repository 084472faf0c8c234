use crate::models::{DeployTrigger, Target, TargetRegistry};
use serde::Deserialize;
use serde_valid::Validate;

/// Top level of the projects file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsForm {
    #[serde(default)]
    pub projects: Vec<ProjectForm>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 64)]
    pub name: String,
    #[validate(pattern = r"^https?://")]
    pub app_url: String,
    #[validate(pattern = r"^https?://")]
    pub deploy_hook: Option<String>,
    #[validate(min_length = 1)]
    pub service_id: Option<String>,
}

impl TryFrom<ProjectForm> for Target {
    type Error = String;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        reqwest::Url::parse(&form.app_url)
            .map_err(|err| format!("Invalid app_url for {}: {}", form.name, err))?;

        let deploy = match (form.deploy_hook, form.service_id) {
            (Some(url), None) => {
                reqwest::Url::parse(&url)
                    .map_err(|err| format!("Invalid deploy_hook for {}: {}", form.name, err))?;
                DeployTrigger::Hook { url }
            }
            (None, Some(id)) => DeployTrigger::Service { id },
            _ => {
                return Err(format!(
                    "Project {} needs exactly one of deploy_hook or service_id",
                    form.name
                ))
            }
        };

        Ok(Target {
            name: form.name,
            app_url: form.app_url,
            deploy,
        })
    }
}

impl ProjectsForm {
    pub fn from_yaml(source: &str) -> Result<Self, String> {
        let form: ProjectsForm = serde_yaml::from_str(source)
            .map_err(|err| format!("Failed to parse projects file: {}", err))?;
        for project in &form.projects {
            if let Err(errors) = project.validate() {
                return Err(format!("Invalid project {:?}: {}", project.name, errors));
            }
        }

        Ok(form)
    }

    pub fn into_registry(self) -> Result<TargetRegistry, String> {
        let targets = self
            .projects
            .into_iter()
            .map(Target::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        TargetRegistry::new(targets)
    }
}
