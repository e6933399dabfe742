//! Session Manager commands.

use crate::shell::ExternalCommand;
use crate::targets::TargetConfig;

/// SSM document that forwards a local port to a host behind the instance.
pub const PORT_FORWARD_DOCUMENT: &str = "AWS-StartPortForwardingSessionToRemoteHost";

/// An interactive shell session on `instance_id`.
pub fn start_session_command(instance_id: &str, profile: &str, region: &str) -> ExternalCommand {
    ExternalCommand::aws([
        "ssm",
        "start-session",
        "--target",
        instance_id,
        "--profile",
        profile,
        "--region",
        region,
    ])
}

/// A port-forwarding session through `instance_id` to `target`.
pub fn port_forward_command(
    instance_id: &str,
    profile: &str,
    region: &str,
    target: &TargetConfig,
) -> ExternalCommand {
    start_session_command(instance_id, profile, region)
        .arg("--document-name")
        .arg(PORT_FORWARD_DOCUMENT)
        .arg("--parameters")
        .arg(format!(
            "host={},portNumber={},localPortNumber={}",
            target.endpoint, target.port, target.local_port
        ))
}
