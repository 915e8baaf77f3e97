use crate::{Config, HostEnvironment};

/// Describe how a session would resolve its inputs, one line per finding.
pub fn doctor(cfg: &Config, env: &HostEnvironment) -> Vec<String> {
    let mut lines = Vec::new();

    match &env.staging_root {
        Some(root) => lines.push(format!("staging root: {} (from {})", root.display(), cfg.host.staging_dir_var)),
        None => lines.push(format!(
            "staging root: {} is not set; a fresh directory will be created under {}",
            cfg.host.staging_dir_var,
            env.temp_base(cfg).display()
        )),
    }

    match &env.temp_dir {
        Some(dir) => lines.push(format!("temp dir: {} (from {})", dir.display(), cfg.host.temp_dir_var)),
        None => lines.push(format!("temp dir: {} is not set", cfg.host.temp_dir_var)),
    }

    lines.push(format!("container folder: {}", cfg.publish.container_folder));
    lines.push(format!("default bucket: {}", cfg.publish.default_bucket));
    lines
}
