#[cfg(test)]
mod tests {
    use actions_kit_tests::{gitleaks_sarif, trivy_sarif, write_file};
    use pretty_assertions::assert_eq;
    use sarif::{CheckType, ConversionOutcome};
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;
    use version::{BuildContext, TagSource, VersionInfo};

    fn read_json(path: &std::path::Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_gitleaks_report_conversion() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_file(temp_dir.path(), "gitleaks.sarif", &gitleaks_sarif().to_string());
        let output = temp_dir.path().join("gitleaks.json");

        let outcome = sarif::convert_file(&input, &output, CheckType::Gitleaks).unwrap();

        assert_eq!(outcome, ConversionOutcome::Written { total_files: 2 });
        assert_eq!(
            read_json(&output),
            json!({
                "gitleaks": {
                    "totalFiles": 2,
                    "files": {
                        "deploy/env.sh": {
                            "3-3": {
                                "name": "deploy/env.sh",
                                "commits": ["aaa111", "bbb222"],
                                "startLine": 3,
                                "endLine": 3,
                                "ruleId": "aws-access-token"
                            }
                        },
                        "src/env.sh": {
                            "10-12": {
                                "name": "src/env.sh",
                                "commits": ["ccc333"],
                                "startLine": 10,
                                "endLine": 12,
                                "ruleId": "generic-api-key"
                            }
                        }
                    },
                    "uniqueFileNames": ["env.sh", "env.sh"]
                }
            })
        );
    }

    #[test]
    fn test_trivy_report_conversion() {
        let temp_dir = TempDir::new().unwrap();
        let input = write_file(temp_dir.path(), "trivy.sarif", &trivy_sarif().to_string());
        let output = temp_dir.path().join("trivy.json");

        sarif::convert_file(&input, &output, CheckType::Trivy).unwrap();

        let report = read_json(&output);
        assert_eq!(
            report["vulnerabilities"]["files"]["poetry.lock"],
            json!([{
                "package": "h11",
                "installedVersion": "0.12.0",
                "fixedVersion": "0.14.0",
                "description": "Request smuggling in h11",
                "name": "poetry.lock",
                "startLine": 1,
                "endLine": 1,
                "ruleId": "CVE-2023-1234",
                "severity": "MEDIUM"
            }])
        );
        assert_eq!(
            report["trivy"]["files"]["certs/dev.pem"],
            json!([{
                "name": "certs/dev.pem",
                "startLine": 1,
                "endLine": 27,
                "ruleId": "private-key",
                "severity": "HIGH"
            }])
        );
        assert_eq!(report["trivy"]["totalFiles"], json!(1));
        assert_eq!(report["trivy"]["details"], trivy_sarif()["runs"][0]["tool"]);
        assert!(fs::read_to_string(&output).unwrap().contains("\n  \""));
    }

    #[test]
    fn test_render_message_from_scan_summary() {
        let temp_dir = TempDir::new().unwrap();
        let template = write_file(
            temp_dir.path(),
            "message.md.j2",
            "{# posted on the pull request #}Secrets found in {{ gitleaks.totalFiles }} files: {{ gitleaks.uniqueFileNames }}\n\
             {%- for name in gitleaks.uniqueFileNames %}\n- `{{ name }}`{% endfor %}\n",
        );
        let data = write_file(
            temp_dir.path(),
            "data.json",
            r#"{ "gitleaks": { "totalFiles": 2, "uniqueFileNames": ["a.env", "b.env"] } }"#,
        );
        let output = temp_dir.path().join("message.md");

        template::render_file(&template, &data, &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Secrets found in 2 files: ['a.env', 'b.env']\n- `a.env`\n- `b.env`"
        );
    }

    #[test]
    fn test_render_message_rejects_bad_data() {
        let temp_dir = TempDir::new().unwrap();
        let template = write_file(temp_dir.path(), "message.j2", "{{ name }}");
        let data = write_file(temp_dir.path(), "data.json", "{ not json");
        let output = temp_dir.path().join("message.txt");

        assert!(template::render_file(&template, &data, &output).is_err());
        assert!(!output.exists());
    }

    struct ReleasedMain;

    impl TagSource for ReleasedMain {
        fn main_tag(&self, _main_branch: &str) -> version::Result<Option<String>> {
            Ok(Some("2.4.1".to_string()))
        }

        fn is_tag_on_branch(&self, tag: &str, _main_branch: &str) -> version::Result<bool> {
            Ok(tag == "2.4.1")
        }
    }

    #[test]
    fn test_version_outputs_and_project_stamping() {
        let temp_dir = TempDir::new().unwrap();
        let project = write_file(
            temp_dir.path(),
            "Api.csproj",
            "<Project Sdk=\"Microsoft.NET.Sdk.Web\">\n  <PropertyGroup>\n    <TargetFramework>net8.0</TargetFramework>\n  </PropertyGroup>\n</Project>\n",
        );
        let github_output = temp_dir.path().join("github_output");

        let context = BuildContext::new("master", "refs/heads/develop", "31", "0c1d2e3");
        let info: VersionInfo = version::get_version(&ReleasedMain, &context).unwrap();
        info.append_outputs(&github_output).unwrap();
        let pattern = format!("{}/*.csproj", temp_dir.path().display());
        version::dotnet::update_project_files(&pattern, &info.informational_version).unwrap();

        assert_eq!(
            fs::read_to_string(&github_output).unwrap(),
            "informational-version=2.5.0-dev.31+0c1d2e3\nsemver=2.5.0-dev.31\nassembly-semver=2.5.0.0\n"
        );
        assert!(fs::read_to_string(&project)
            .unwrap()
            .contains("    <TargetFramework>net8.0</TargetFramework>\n    <Version>2.5.0-dev.31+0c1d2e3</Version>\n  </PropertyGroup>"));
    }

    #[test]
    fn test_release_tag_outside_main_is_rejected() {
        let context = BuildContext::new("master", "refs/tags/2.3.9", "5", "abc");
        let err = version::get_version(&ReleasedMain, &context).unwrap_err();
        assert_eq!(err.user_message(), "Tag 2.3.9 does not belong to master branch");
    }
}
