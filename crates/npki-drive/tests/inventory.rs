//! End-to-end discovery against real directory trees.

use npki_drive::{
    DeviceId, DriveScanner, Host, KeyFile, Platform, SavePathGroup, StaticDevices,
    StorageDevice, TokioFs,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scanner(home: &Path, devices: Vec<StorageDevice>) -> DriveScanner<StaticDevices, TokioFs> {
    DriveScanner::new(Host::new(Platform::Linux, home), StaticDevices(devices), TokioFs)
}

#[tokio::test]
async fn primary_group_is_always_present() {
    let home = TempDir::new().unwrap();
    let groups = scanner(home.path(), Vec::new())
        .drive_save_paths()
        .await
        .unwrap();

    assert_eq!(groups, vec![SavePathGroup::primary(home.path().join("NPKI"))]);
}

#[tokio::test]
async fn one_group_per_usb_device_with_one_path_per_mount() {
    let home = TempDir::new().unwrap();
    let devices = vec![
        StorageDevice::new("/dev/nvme0n1").mounted_at("/").mounted_at("/boot"),
        StorageDevice::new("/dev/sdb")
            .usb(true)
            .mounted_at("/media/kim/A")
            .mounted_at("/media/kim/B"),
    ];

    let scanner = scanner(home.path(), devices);
    let external = scanner.external_drive_save_paths().await.unwrap();

    assert_eq!(external.len(), 1);
    assert_eq!(external[0].device, Some(DeviceId::new("/dev/sdb")));
    assert_eq!(external[0].paths.len(), 2);
    assert!(external[0].paths.iter().all(|p| p.ends_with("NPKI")));

    let all = scanner.drive_save_paths().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].is_primary());
    assert_eq!(all[1], external[0]);
}

#[tokio::test]
async fn missing_root_contributes_nothing() {
    let home = TempDir::new().unwrap();
    let stick = TempDir::new().unwrap();
    fs::create_dir_all(stick.path().join("NPKI/ISSUER1/USER/CN=Alice")).unwrap();
    fs::create_dir_all(stick.path().join("NPKI/ISSUER1/USER/CN=Bob")).unwrap();

    let devices = vec![StorageDevice::new("/dev/sdb").usb(true).mounted_at(stick.path())];
    let records = scanner(home.path(), devices)
        .drive_certificates()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    let mut subjects: Vec<_> = records.iter().map(|r| r.distinguished_name.clone()).collect();
    subjects.sort();
    assert_eq!(subjects, ["CN=Alice", "CN=Bob"]);

    for record in &records {
        assert_eq!(record.issuer_id, "ISSUER1");
        assert_eq!(record.save_path, stick.path().join("NPKI"));
        assert_eq!(record.device, Some(DeviceId::new("/dev/sdb")));
        let expected = [
            (KeyFile::SignCert, "signCert.der"),
            (KeyFile::SignPrivateKey, "signPri.key"),
            (KeyFile::KmCert, "kmCert.der"),
            (KeyFile::KmPrivateKey, "kmPri.key"),
        ];
        for (file, name) in expected {
            let candidate = record.key_path(file).unwrap();
            assert!(candidate.as_path().ends_with(name));
            assert!(!candidate.as_path().exists());
        }
    }
}

#[tokio::test]
async fn files_at_issuer_and_subject_level_are_excluded() {
    let home = TempDir::new().unwrap();
    let npki = home.path().join("NPKI");
    fs::create_dir_all(npki.join("yessign/USER/cn=Kim")).unwrap();
    fs::write(npki.join("not-an-issuer"), b"x").unwrap();
    fs::write(npki.join("yessign/USER/not-a-subject"), b"x").unwrap();

    let records = scanner(home.path(), Vec::new())
        .drive_certificates()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject_dir(), npki.join("yessign/USER/cn=Kim"));
}

#[tokio::test]
async fn scans_are_idempotent() {
    let home = TempDir::new().unwrap();
    let stick = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join("NPKI/yessign/USER/cn=Kim")).unwrap();
    fs::create_dir_all(stick.path().join("NPKI/crosscert/USER/cn=Lee")).unwrap();
    let devices = vec![StorageDevice::new("/dev/sdb").usb(true).mounted_at(stick.path())];
    let scanner = scanner(home.path(), devices);

    let first = scanner.inventory().await.unwrap();
    let second = scanner.inventory().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.certificates[0].issuer_id, "yessign");
    assert_eq!(first.certificates[1].issuer_id, "crosscert");
}
