/// The kind of build a CI ref stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildRef<'a> {
    /// `refs/tags/<tag>`
    Tag(&'a str),
    /// `refs/heads/release/<name>`
    Release(&'a str),
    /// `refs/heads/hotfix/<name>`
    Hotfix(&'a str),
    /// `refs/heads/<main branch>`
    Main,
    Develop,
    /// `refs/heads/feature/<name>`
    Feature(&'a str),
    Other,
}

const TAGS_PREFIX: &str = "refs/tags/";
const HEADS_PREFIX: &str = "refs/heads/";

impl<'a> BuildRef<'a> {
    #[must_use]
    pub fn parse(git_ref: &'a str, main_branch: &str) -> Self {
        if let Some(tag) = git_ref.strip_prefix(TAGS_PREFIX) {
            return Self::Tag(tag);
        }

        let Some(branch) = git_ref.strip_prefix(HEADS_PREFIX) else {
            return Self::Other;
        };

        if let Some(name) = branch.strip_prefix("release/") {
            Self::Release(name)
        } else if let Some(name) = branch.strip_prefix("hotfix/") {
            Self::Hotfix(name)
        } else if branch == main_branch {
            Self::Main
        } else if branch == "develop" {
            Self::Develop
        } else if let Some(name) = branch.strip_prefix("feature/") {
            Self::Feature(name)
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Tag(_) | Self::Main => "Main branch",
            Self::Release(_) => "Release branch",
            Self::Hotfix(_) => "Hotfix branch",
            Self::Develop => "Develop branch",
            Self::Feature(_) => "Feature branch",
            Self::Other => "Unknown branch",
        }
    }

    /// Pre-release suffix for this build, empty for tagged builds
    #[must_use]
    pub fn suffix(&self, run_number: &str) -> String {
        match self {
            Self::Tag(_) | Self::Main => String::new(),
            Self::Release(_) => format!("-beta.{run_number}"),
            Self::Hotfix(name) | Self::Feature(name) => format!("-{name}.{run_number}"),
            Self::Develop => format!("-dev.{run_number}"),
            Self::Other => format!("-unknown.{run_number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_refs() {
        assert_eq!(BuildRef::parse("refs/tags/1.2.3", "main"), BuildRef::Tag("1.2.3"));
        assert_eq!(
            BuildRef::parse("refs/heads/release/1.3.0", "main"),
            BuildRef::Release("1.3.0")
        );
        assert_eq!(
            BuildRef::parse("refs/heads/hotfix/login", "main"),
            BuildRef::Hotfix("login")
        );
        assert_eq!(BuildRef::parse("refs/heads/main", "main"), BuildRef::Main);
        assert_eq!(BuildRef::parse("refs/heads/develop", "main"), BuildRef::Develop);
        assert_eq!(
            BuildRef::parse("refs/heads/feature/search/v2", "main"),
            BuildRef::Feature("search/v2")
        );
        assert_eq!(BuildRef::parse("refs/heads/bugfix/x", "main"), BuildRef::Other);
        assert_eq!(BuildRef::parse("refs/pull/7/merge", "main"), BuildRef::Other);
    }

    #[test]
    fn test_main_branch_name_is_configurable() {
        assert_eq!(BuildRef::parse("refs/heads/master", "master"), BuildRef::Main);
        assert_eq!(BuildRef::parse("refs/heads/master", "main"), BuildRef::Other);
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(BuildRef::Tag("1.0.0").suffix("7"), "");
        assert_eq!(BuildRef::Release("1.0.0").suffix("7"), "-beta.7");
        assert_eq!(BuildRef::Hotfix("crash").suffix("7"), "-crash.7");
        assert_eq!(BuildRef::Develop.suffix("7"), "-dev.7");
        assert_eq!(BuildRef::Other.suffix("7"), "-unknown.7");
    }
}
