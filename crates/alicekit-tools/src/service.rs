use std::path::Path;

use async_trait::async_trait;

use crate::args::quote;
use crate::error::ToolError;
use crate::runner::ToolRunner;

/// Result of `alice-ar list`: the raw output plus one entry per non-empty
/// line.
#[derive(Debug, Clone)]
pub struct ArListing {
    pub raw_output: String,
    pub entries: Vec<String>,
}

/// Typed surface over the alice-tools executables.
///
/// One method per tool operation; each spawns exactly one child process.
/// Paths are quoted before being embedded in the argument string, so callers
/// may pass paths containing spaces.
#[async_trait]
pub trait AliceTools: Send + Sync {
    async fn ar_list(&self, archive: &Path) -> Result<ArListing, ToolError>;
    async fn ar_extract(&self, archive: &Path, output: &Path) -> Result<(), ToolError>;
    async fn ar_pack(&self, source: &Path, output: &Path) -> Result<(), ToolError>;

    async fn ain_dump(&self, ain: &Path, output: &Path) -> Result<String, ToolError>;
    async fn ain_edit(&self, ain: &Path) -> Result<(), ToolError>;
    async fn ain_compare(&self, first: &Path, second: &Path) -> Result<String, ToolError>;

    async fn ex_dump(&self, ex: &Path, output: &Path) -> Result<String, ToolError>;
    async fn ex_build(&self, source: &Path, output: &Path) -> Result<(), ToolError>;
    async fn ex_compare(&self, first: &Path, second: &Path) -> Result<String, ToolError>;

    async fn acx_dump(&self, acx: &Path, output: &Path) -> Result<String, ToolError>;
    async fn acx_build(&self, source: &Path, output: &Path) -> Result<(), ToolError>;
}

#[derive(Debug, Clone, Default)]
pub struct AliceToolsService {
    runner: ToolRunner,
}

impl AliceToolsService {
    #[must_use]
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    async fn run(&self, tool_name: &str, arguments: String) -> Result<String, ToolError> {
        let output = self.runner.run(tool_name, &arguments).await?;
        Ok(output.stdout)
    }
}

#[async_trait]
impl AliceTools for AliceToolsService {
    async fn ar_list(&self, archive: &Path) -> Result<ArListing, ToolError> {
        let raw_output = self
            .run("alice-ar", format!("list {}", quote(archive)))
            .await?;
        let entries = parse_listing(&raw_output);
        Ok(ArListing {
            raw_output,
            entries,
        })
    }

    async fn ar_extract(&self, archive: &Path, output: &Path) -> Result<(), ToolError> {
        self.run(
            "alice-ar",
            format!("extract {} -o {}", quote(archive), quote(output)),
        )
        .await?;
        Ok(())
    }

    async fn ar_pack(&self, source: &Path, output: &Path) -> Result<(), ToolError> {
        self.run(
            "alice-ar",
            format!("pack {} -o {}", quote(source), quote(output)),
        )
        .await?;
        Ok(())
    }

    async fn ain_dump(&self, ain: &Path, output: &Path) -> Result<String, ToolError> {
        self.run(
            "alice-ain",
            format!("dump {} -o {}", quote(ain), quote(output)),
        )
        .await
    }

    async fn ain_edit(&self, ain: &Path) -> Result<(), ToolError> {
        self.run("alice-ain", format!("edit {}", quote(ain))).await?;
        Ok(())
    }

    async fn ain_compare(&self, first: &Path, second: &Path) -> Result<String, ToolError> {
        self.run(
            "alice-ain",
            format!("compare {} {}", quote(first), quote(second)),
        )
        .await
    }

    async fn ex_dump(&self, ex: &Path, output: &Path) -> Result<String, ToolError> {
        self.run(
            "alice-ex",
            format!("dump {} -o {}", quote(ex), quote(output)),
        )
        .await
    }

    async fn ex_build(&self, source: &Path, output: &Path) -> Result<(), ToolError> {
        self.run(
            "alice-ex",
            format!("build {} -o {}", quote(source), quote(output)),
        )
        .await?;
        Ok(())
    }

    async fn ex_compare(&self, first: &Path, second: &Path) -> Result<String, ToolError> {
        self.run(
            "alice-ex",
            format!("compare {} {}", quote(first), quote(second)),
        )
        .await
    }

    async fn acx_dump(&self, acx: &Path, output: &Path) -> Result<String, ToolError> {
        self.run(
            "alice-acx",
            format!("dump {} -o {}", quote(acx), quote(output)),
        )
        .await
    }

    async fn acx_build(&self, source: &Path, output: &Path) -> Result<(), ToolError> {
        self.run(
            "alice-acx",
            format!("build {} -o {}", quote(source), quote(output)),
        )
        .await?;
        Ok(())
    }
}

fn parse_listing(raw_output: &str) -> Vec<String> {
    raw_output
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_listing;

    #[test]
    fn listing_drops_empty_lines() {
        let entries = parse_listing("0: data.ald\n\n1: extra.ald\n");
        assert_eq!(entries, vec!["0: data.ald", "1: extra.ald"]);
    }

    #[test]
    fn empty_output_yields_no_entries() {
        assert!(parse_listing("").is_empty());
    }
}
