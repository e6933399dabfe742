//! Running EC2 instance discovery.

use serde::Deserialize;

use crate::error::{AsmagoError, Result};
use crate::shell::ExternalCommand;

/// JMESPath projection reducing `describe-instances` output to id + Name tag.
const INSTANCE_QUERY: &str = "Reservations[].Instances[].{ID:InstanceId,Name:Tags[?Key=='Name']|[0].Value}";

/// A running instance as reported by `aws ec2 describe-instances`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instance {
    #[serde(rename = "ID")]
    pub id: String,

    /// Value of the `Name` tag, if any.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

impl Instance {
    /// The Name tag when present and non-empty.
    pub fn name_tag(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Name to store and show: the Name tag, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name_tag().unwrap_or(&self.id)
    }

    /// Picker label.
    pub fn label(&self) -> String {
        match self.name_tag() {
            Some(name) => format!("{} ({})", name, self.id),
            None => format!("{} (No 'Name' tag)", self.id),
        }
    }
}

/// Command listing running instances for a profile and region.
pub fn list_running_command(profile: &str, region: &str) -> ExternalCommand {
    ExternalCommand::aws([
        "ec2",
        "describe-instances",
        "--profile",
        profile,
        "--region",
        region,
        "--filters",
        "Name=instance-state-name,Values=running",
        "--query",
        INSTANCE_QUERY,
        "--output",
        "json",
    ])
}

/// Parse the JSON produced by [`list_running_command`].
pub fn parse_instances(json: &str) -> Result<Vec<Instance>> {
    serde_json::from_str(json).map_err(|e| {
        AsmagoError::Other(anyhow::anyhow!(
            "failed to parse describe-instances output: {}",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_unnamed_instances() {
        let json = r#"[
            {"ID": "i-0aaa", "Name": "dev-web-1"},
            {"ID": "i-0bbb", "Name": null},
            {"ID": "i-0ccc"}
        ]"#;
        let instances = parse_instances(json).unwrap();
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].name_tag(), Some("dev-web-1"));
        assert_eq!(instances[1].name, None);
        assert_eq!(instances[2].display_name(), "i-0ccc");
    }

    #[test]
    fn empty_list() {
        assert!(parse_instances("[]").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_instances("not json").is_err());
    }

    #[test]
    fn labels() {
        let named = Instance {
            id: "i-1".into(),
            name: Some("qa-db-bastion".into()),
        };
        let unnamed = Instance {
            id: "i-2".into(),
            name: Some(String::new()),
        };
        assert_eq!(named.label(), "qa-db-bastion (i-1)");
        assert_eq!(unnamed.label(), "i-2 (No 'Name' tag)");
        assert_eq!(unnamed.display_name(), "i-2");
    }

    #[test]
    fn list_command_filters_running_and_outputs_json() {
        let cmd = list_running_command("dev", "ap-southeast-1");
        let line = cmd.to_string();
        assert!(line.starts_with("aws ec2 describe-instances --profile dev --region ap-southeast-1"));
        assert!(line.contains("Name=instance-state-name,Values=running"));
        assert!(line.ends_with("--output json"));
    }
}
