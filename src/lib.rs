//! Workspace root package. It carries workspace-level tooling such as the
//! pre-commit hook; the code lives in `crates/`.
