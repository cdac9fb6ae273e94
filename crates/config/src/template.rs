//! Default configuration template with every option documented.
//!
//! Written by `autocode config init` so users can see everything that can
//! be configured even if they keep the defaults.

/// Generate the default config template.
pub fn default_config_template() -> String {
    r##"# autocode configuration
# ======================
# Every option is listed with its default value.
#
# Environment variable substitution is supported: ${ENV_VAR}
# Example: roots = ["${HOME}/projects/api"]

# ══════════════════════════════════════════════════════════════════════════════
# WIZARD
# ══════════════════════════════════════════════════════════════════════════════

[wizard]
title = "Create some codes from service"   # Shown on every prompt
default_file_name = "serviceA.java"        # Suggested when no name was entered yet
services = [                               # "<name>: <path>", split at the first ':'
  "some-service-1: /service/one",
  "some-service-2: /service/two",
  "some-service-3: /service/three",
  "some-service-4: /service/four",
  "some-service-5: /service/five",
]

# ══════════════════════════════════════════════════════════════════════════════
# FILE NAME VALIDATION
# ══════════════════════════════════════════════════════════════════════════════

[validation]
reserved_names = ["vscode"]   # Rejected with "Name not unique"
latency_ms = 1000             # Simulated round-trip of every validation

# ══════════════════════════════════════════════════════════════════════════════
# TEMPLATE
# ══════════════════════════════════════════════════════════════════════════════
# Tokens look like {{serviceName}}. Available fields: serviceName, serviceUrl,
# name, fileName, resourceGroup, title, step, totalSteps.

[template]
path = "templates/service.java"   # Relative to the directory of this file
strict = false                    # true = unknown tokens fail instead of "undefined"

# ══════════════════════════════════════════════════════════════════════════════
# WORKSPACE
# ══════════════════════════════════════════════════════════════════════════════

[workspace]
roots = []                        # Generated files land in the first root (default: cwd)
"##
    .to_string()
}
