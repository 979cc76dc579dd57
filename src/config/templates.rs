// src/config/templates.rs

//! Text written by `atlas-ops init` and printed by `atlas-ops env example`.

/// Starter configuration.
pub const CONFIG_TEMPLATE: &str = r#"
# Example Atlas Ops configuration
project: atlas-core
environment: dev

# Variables applied to every step (a step's own env wins on conflicts).
env:
  ATLAS_ENV: dev

requirements:
  - name: git
    description: Ensure git CLI is present
    check: git --version
  - name: make
    description: Verify that make is available
    check: make --version

# Tasks are run in the order given on the command line; the steps of a task
# run one after another and stop at the first failure.
tasks:
  bootstrap:
    description: Install dependencies and prepare the workspace
    steps:
      - run: git submodule update --init --recursive
      - run: make deps
  lint:
    description: Run static analysis across the codebase
    steps:
      - run: make lint
  deploy:
    description: Build and release the service
    steps:
      - run: make build
      - run: make deploy
        env:
          DEPLOY_TARGET: staging
"#;

/// Sample task snippets.
pub const TASKS_HELP: &str = r#"
Copy any of these under the `tasks:` key of atlas_ops.yml.

  test:
    description: Run the test suite
    steps:
      - run: cargo test --workspace

  docs:
    description: Build documentation from a sub-directory
    steps:
      - run: mdbook build
        workdir: docs

  release:
    description: Tag and push a release
    steps:
      - run: git tag "v$VERSION"
        env:
          VERSION: 1.2.3
      - run: git push --tags

Each step accepts:
  run      shell command (required; pipes and redirects work)
  workdir  directory to run in (optional)
  env      extra environment variables (optional)
"#;
