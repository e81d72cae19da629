//! Typed model of a `Dockerfile`.
//!
//! A [`Dockerfile`] is an optional comment header followed by one or more
//! [`Stage`]s. Each instruction knows how to print itself, so the rendered
//! recipe is always syntactically complete.

use std::fmt;

/// A single build instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Comment(String),
    Workdir(String),
    Copy {
        from: Option<String>,
        src: String,
        dest: String,
    },
    Run(String),
    Env {
        key: String,
        value: String,
    },
    Expose(u16),
    User(String),
    /// Exec-form `CMD`.
    Cmd(Vec<String>),
    /// Exec-form `ENTRYPOINT`.
    Entrypoint(Vec<String>),
}

impl Instruction {
    /// `RUN if [ -f a ]; then x; elif [ -f b ]; then y; fi`
    ///
    /// Each branch runs only if its manifest exists; with no manifest the
    /// step is a no-op, so the build never assumes project files exist.
    pub fn run_if_exists(branches: &[(&str, &str)]) -> Self {
        let mut script = String::new();
        for (i, (manifest, command)) in branches.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "elif" };
            if i > 0 {
                script.push(' ');
            }
            script.push_str(&format!("{keyword} [ -f {manifest} ]; then {command};"));
        }
        if !branches.is_empty() {
            script.push_str(" fi");
        }
        Self::Run(script)
    }
}

fn exec_form(args: &[String]) -> String {
    let quoted: Vec<String> = args
        .iter()
        .map(|a| format!("\"{}\"", a.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "# {text}"),
            Self::Workdir(dir) => write!(f, "WORKDIR {dir}"),
            Self::Copy {
                from: Some(stage),
                src,
                dest,
            } => write!(f, "COPY --from={stage} {src} {dest}"),
            Self::Copy {
                from: None,
                src,
                dest,
            } => write!(f, "COPY {src} {dest}"),
            Self::Run(cmd) => write!(f, "RUN {cmd}"),
            Self::Env { key, value } => write!(f, "ENV {key}={value}"),
            Self::Expose(port) => write!(f, "EXPOSE {port}"),
            Self::User(user) => write!(f, "USER {user}"),
            Self::Cmd(args) => write!(f, "CMD {}", exec_form(args)),
            Self::Entrypoint(args) => write!(f, "ENTRYPOINT {}", exec_form(args)),
        }
    }
}

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One `FROM` block and the instructions that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    base: String,
    alias: Option<String>,
    instructions: Vec<Instruction>,
}

impl Stage {
    pub fn from_image(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            alias: None,
            instructions: Vec::new(),
        }
    }

    /// Name the stage so later stages can `COPY --from` it.
    pub fn named(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn push(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn comment(self, text: impl Into<String>) -> Self {
        self.push(Instruction::Comment(text.into()))
    }

    pub fn workdir(self, dir: impl Into<String>) -> Self {
        self.push(Instruction::Workdir(dir.into()))
    }

    pub fn copy(self, src: impl Into<String>, dest: impl Into<String>) -> Self {
        self.push(Instruction::Copy {
            from: None,
            src: src.into(),
            dest: dest.into(),
        })
    }

    pub fn copy_from(
        self,
        stage: impl Into<String>,
        src: impl Into<String>,
        dest: impl Into<String>,
    ) -> Self {
        self.push(Instruction::Copy {
            from: Some(stage.into()),
            src: src.into(),
            dest: dest.into(),
        })
    }

    pub fn run(self, command: impl Into<String>) -> Self {
        self.push(Instruction::Run(command.into()))
    }

    pub fn run_if_exists(self, branches: &[(&str, &str)]) -> Self {
        self.push(Instruction::run_if_exists(branches))
    }

    pub fn env(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Instruction::Env {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn expose(self, port: u16) -> Self {
        self.push(Instruction::Expose(port))
    }

    pub fn user(self, user: impl Into<String>) -> Self {
        self.push(Instruction::User(user.into()))
    }

    pub fn cmd(self, args: &[&str]) -> Self {
        self.push(Instruction::Cmd(args.iter().map(|a| a.to_string()).collect()))
    }

    pub fn entrypoint(self, args: &[&str]) -> Self {
        self.push(Instruction::Entrypoint(
            args.iter().map(|a| a.to_string()).collect(),
        ))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => writeln!(f, "FROM {} AS {alias}", self.base)?,
            None => writeln!(f, "FROM {}", self.base)?,
        }
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

// ── Dockerfile ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    header: Vec<String>,
    stages: Vec<Stage>,
}

impl Dockerfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment line above the first stage.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn final_stage(&self) -> Option<&Stage> {
        self.stages.last()
    }

    /// Port of the first `EXPOSE` in the final stage.
    pub fn exposed_port(&self) -> Option<u16> {
        self.final_stage()?.instructions.iter().find_map(|i| match i {
            Instruction::Expose(port) => Some(*port),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dockerfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            writeln!(f, "# {line}")?;
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 || !self.header.is_empty() {
                writeln!(f)?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_run_chains_branches() {
        let run = Instruction::run_if_exists(&[
            ("package-lock.json", "npm ci --omit=dev"),
            ("package.json", "npm install --omit=dev"),
        ]);
        assert_eq!(
            run.to_string(),
            "RUN if [ -f package-lock.json ]; then npm ci --omit=dev; \
             elif [ -f package.json ]; then npm install --omit=dev; fi"
        );
    }

    #[test]
    fn single_branch_conditional() {
        let run = Instruction::run_if_exists(&[("go.mod", "go mod download")]);
        assert_eq!(
            run.to_string(),
            "RUN if [ -f go.mod ]; then go mod download; fi"
        );
    }

    #[test]
    fn cmd_uses_exec_form() {
        let cmd = Instruction::Cmd(vec!["npm".into(), "start".into()]);
        assert_eq!(cmd.to_string(), r#"CMD ["npm", "start"]"#);
    }

    #[test]
    fn multi_stage_render() {
        let file = Dockerfile::new()
            .header("generated")
            .stage(
                Stage::from_image("golang:1.24-alpine")
                    .named("builder")
                    .workdir("/app"),
            )
            .stage(
                Stage::from_image("alpine:3.21")
                    .copy_from("builder", "/app/main", ".")
                    .expose(8080)
                    .cmd(&["./main"]),
            );

        let text = file.render();
        assert!(text.starts_with("# generated\n\nFROM golang:1.24-alpine AS builder\n"));
        assert!(text.contains("\n\nFROM alpine:3.21\n"));
        assert!(text.contains("COPY --from=builder /app/main ."));
        assert!(text.trim_end().ends_with(r#"CMD ["./main"]"#));
        assert_eq!(file.exposed_port(), Some(8080));
    }

    #[test]
    fn comment_renders_inside_stage() {
        let stage = Stage::from_image("x").comment("note").run("b");
        assert_eq!(stage.to_string(), "FROM x\n# note\nRUN b\n");
    }
}
