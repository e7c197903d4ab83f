use assert_cmd::Command;

fn posterboard() -> Command {
    let mut cmd = Command::cargo_bin("posterboard").unwrap();
    cmd.env_remove("POSTERBOARD_ENV")
        .env("POSTERBOARD_CONFIG_DIR", std::env::temp_dir().join("posterboard-cli-no-config"));
    cmd
}

#[test]
fn openapi_command_prints_merged_document() {
    let output = posterboard().arg("openapi").output().unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(document["paths"]["/api/v1/posters"]["get"].is_object());
    assert!(document["paths"]["/api/v1/posters/{id}"]["patch"].is_object());
}

#[test]
fn unknown_environment_fails_to_start() {
    posterboard()
        .env("POSTERBOARD_ENV", "qa")
        .arg("openapi")
        .assert()
        .failure();
}
