use super::*;

fn scratch(name: &str) -> SessionFile {
    let path = std::env::temp_dir().join(format!("campus-cli-{}-{name}", std::process::id()));
    if path.exists() {
        fs::remove_file(&path).unwrap();
    }
    SessionFile::new(path)
}

#[test]
fn missing_file_means_no_session() {
    let file = scratch("missing");
    assert_eq!(file.load().unwrap(), None);
}

#[test]
fn saved_header_loads_back_trimmed() {
    let file = scratch("saved");
    file.save(Some("accessToken=a1; refreshToken=r1")).unwrap();

    assert_eq!(file.load().unwrap().as_deref(), Some("accessToken=a1; refreshToken=r1"));
    fs::remove_file(file.path()).unwrap();
}

#[test]
fn saving_nothing_removes_the_file() {
    let file = scratch("cleared");
    file.save(Some("accessToken=a1")).unwrap();

    file.save(None).unwrap();

    assert!(!file.path().exists());
    file.save(Some("  ")).unwrap();
    assert!(!file.path().exists());
}

#[cfg(unix)]
#[test]
fn session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let file = scratch("private");
    file.save(Some("refreshToken=r1")).unwrap();

    let mode = fs::metadata(file.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    fs::remove_file(file.path()).unwrap();
}
