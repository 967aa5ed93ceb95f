use std::fmt;

/// States of one generation run.
///
/// ```text
/// Init → DirectoryScaffold → TemplateMaterialization → DependencyInit
///      → AssetFetch → CodeGeneration → DependencyTidy → Done
/// ```
///
/// Any state may end the run instead of advancing; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Init,
    DirectoryScaffold,
    TemplateMaterialization,
    DependencyInit,
    AssetFetch,
    CodeGeneration,
    DependencyTidy,
    Done,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::DirectoryScaffold => "directory-scaffold",
            Self::TemplateMaterialization => "template-materialization",
            Self::DependencyInit => "dependency-init",
            Self::AssetFetch => "asset-fetch",
            Self::CodeGeneration => "code-generation",
            Self::DependencyTidy => "dependency-tidy",
            Self::Done => "done",
        }
    }

    /// Phases driven by external steps rather than the core itself.
    pub const fn is_external(self) -> bool {
        matches!(
            self,
            Self::DependencyInit | Self::AssetFetch | Self::CodeGeneration | Self::DependencyTidy
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_ordered_like_the_pipeline() {
        assert!(Phase::Init < Phase::DirectoryScaffold);
        assert!(Phase::TemplateMaterialization < Phase::DependencyInit);
        assert!(Phase::DependencyInit < Phase::AssetFetch);
        assert!(Phase::DependencyTidy < Phase::Done);
    }

    #[test]
    fn only_step_phases_are_external() {
        assert!(!Phase::TemplateMaterialization.is_external());
        assert!(Phase::AssetFetch.is_external());
        assert!(!Phase::Done.is_external());
    }
}
