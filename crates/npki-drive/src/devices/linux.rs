//! Block devices from sysfs, mount points from `/proc/mounts`.
//!
//! The mount table is decoded in a single pass over the raw kernel text.
//! Decoding `\134` before `\040` would turn a literal `\040` in a
//! directory name into a space.

use npki_core::{DeviceId, MountPoint, NpkiError, Result, StorageDevice};
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kernel's block device directory
pub const SYS_BLOCK: &str = "/sys/block";

/// Mount table of the calling process's namespace
pub const PROC_MOUNTS: &str = "/proc/mounts";

/// sysfs reports sizes in 512-byte sectors regardless of the hardware.
const SECTOR_SIZE: u64 = 512;

/// RAM-backed and loopback devices never hold a certificate store.
const VIRTUAL_PREFIXES: &[&str] = &["loop", "ram", "zram"];

/// Enumerate block devices under `sys_block` and attach the mount points
/// listed in `mount_table`.
pub(super) async fn list_devices(
    sys_block: &Path,
    mount_table: &Path,
) -> Result<Vec<StorageDevice>> {
    let mut devices = read_block_devices(sys_block).await?;

    let table = tokio::fs::read(mount_table)
        .await
        .map_err(|e| NpkiError::device_list(format!("reading {}: {e}", mount_table.display())))?;
    let mounts = parse_mount_table(&table);

    attach_mounts(&mut devices, &mounts);
    debug!(count = devices.len(), "enumerated block devices");
    Ok(devices)
}

async fn read_block_devices(sys_block: &Path) -> Result<Vec<StorageDevice>> {
    let list_err =
        |e: std::io::Error| NpkiError::device_list(format!("{}: {e}", sys_block.display()));

    let mut dir = tokio::fs::read_dir(sys_block).await.map_err(list_err)?;
    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(list_err)? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if VIRTUAL_PREFIXES.iter().any(|p| name.starts_with(p)) {
            continue;
        }
        names.push(name);
    }
    names.sort();

    let mut devices = Vec::with_capacity(names.len());
    for name in names {
        devices.push(read_block_device(&sys_block.join(&name), &name).await);
    }
    Ok(devices)
}

async fn read_block_device(dir: &Path, name: &str) -> StorageDevice {
    let is_removable = read_attr(&dir.join("removable")).await.as_deref() == Some("1");
    let size_bytes = read_attr(&dir.join("size"))
        .await
        .and_then(|s| s.parse::<u64>().ok())
        .map_or(0, |sectors| sectors.saturating_mul(SECTOR_SIZE));

    let vendor = read_attr(&dir.join("device/vendor")).await;
    let model = read_attr(&dir.join("device/model")).await;
    let description = [vendor, model]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    // /sys/block/<name> links into the device tree; USB disks sit below a usbN node
    let is_usb = match tokio::fs::canonicalize(dir).await {
        Ok(real) => is_usb_path(&real),
        Err(e) => {
            debug!(device = name, error = %e, "cannot resolve sysfs device link");
            false
        }
    };

    StorageDevice {
        id: DeviceId::new(format!("/dev/{name}")),
        description,
        size_bytes,
        is_usb,
        is_removable,
        mount_points: Vec::new(),
    }
}

async fn read_attr(path: &Path) -> Option<String> {
    tokio::fs::read_to_string(path)
        .await
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_usb_path(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_str().is_some_and(|s| s.starts_with("usb")))
}

/// Append every mount whose source is the disk or one of its partitions,
/// in mount table order.
fn attach_mounts(devices: &mut [StorageDevice], mounts: &[(String, PathBuf)]) {
    for device in devices {
        let Some(disk) = device.id.as_str().strip_prefix("/dev/") else {
            continue;
        };
        let found: Vec<MountPoint> = mounts
            .iter()
            .filter(|(spec, _)| belongs_to(spec, disk))
            .map(|(_, path)| MountPoint::new(path.clone()))
            .collect();
        device.mount_points.extend(found);
    }
}

/// `/dev/sdb`, `/dev/sdb1` belong to `sdb`; `/dev/nvme0n1p2` to `nvme0n1`.
fn belongs_to(spec: &str, disk: &str) -> bool {
    let Some(rest) = spec.strip_prefix("/dev/").and_then(|s| s.strip_prefix(disk)) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }

    // Disks whose name ends in a digit separate partitions with 'p'
    let number = if disk.ends_with(|c: char| c.is_ascii_digit()) {
        match rest.strip_prefix('p') {
            Some(n) => n,
            None => return false,
        }
    } else {
        rest
    };
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
}

/// `(source, mount directory)` pairs in table order. Lines with fewer than
/// two fields are skipped.
fn parse_mount_table(table: &[u8]) -> Vec<(String, PathBuf)> {
    table
        .split(|&b| b == b'\n')
        .filter_map(|line| {
            let mut fields = line
                .split(u8::is_ascii_whitespace)
                .filter(|f| !f.is_empty());
            let spec = fields.next()?;
            let dir = fields.next()?;
            let spec = String::from_utf8_lossy(&unescape(spec)).into_owned();
            Some((spec, PathBuf::from(OsString::from_vec(unescape(dir)))))
        })
        .collect()
}

/// Undo the kernel's octal escaping of whitespace and backslashes in one
/// pass (`\040` is a space, `\134` a backslash).
fn unescape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let value = digits.iter().fold(0u16, |acc, b| acc * 8 + u16::from(b - b'0'));
                if let Ok(byte) = u8::try_from(value) {
                    out.push(byte);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_belongs_to_disk_and_partitions() {
        assert!(belongs_to("/dev/sdb", "sdb"));
        assert!(belongs_to("/dev/sdb1", "sdb"));
        assert!(belongs_to("/dev/sdb12", "sdb"));
        assert!(!belongs_to("/dev/sdba1", "sdb"));
        assert!(!belongs_to("/dev/sda1", "sdb"));
        assert!(!belongs_to("tmpfs", "sdb"));

        assert!(belongs_to("/dev/nvme0n1p2", "nvme0n1"));
        assert!(!belongs_to("/dev/nvme0n10", "nvme0n1"));
        assert!(belongs_to("/dev/mmcblk0p1", "mmcblk0"));
    }

    #[test]
    fn test_parse_mount_table_decodes_each_escape_once() {
        let table = b"sysfs /sys sysfs rw,nosuid 0 0\n\
            /dev/sdb1 /media/kim/MY\\040KEY vfat rw 0 0\n\
            /dev/sdb2 /media/k/a\\134040b vfat rw 0 0\n\
            /dev/sdc1 /mnt/tab\\011x\\134\\134y ext4 rw 0 0\n\
            /dev/sdd1 /mnt/tail\\04 ext4 rw 0 0\n\
            \n";

        let mounts = parse_mount_table(table);
        let dirs: Vec<_> = mounts.iter().map(|(_, dir)| dir.clone()).collect();
        assert_eq!(
            dirs,
            [
                PathBuf::from("/sys"),
                PathBuf::from("/media/kim/MY KEY"),
                PathBuf::from("/media/k/a\\040b"),
                PathBuf::from("/mnt/tab\tx\\\\y"),
                PathBuf::from("/mnt/tail\\04"),
            ]
        );
        assert_eq!(mounts[2].0, "/dev/sdb2");
    }

    #[test]
    fn test_parse_mount_table_keeps_non_utf8_dirs() {
        use std::os::unix::ffi::OsStrExt;

        let mounts = parse_mount_table(b"/dev/sdb1 /media/\\377key vfat rw 0 0\n");
        assert_eq!(
            mounts[0].1.as_os_str().as_bytes(),
            b"/media/\xffkey".as_slice()
        );
    }

    #[tokio::test]
    async fn test_list_devices_attaches_mounts_from_table() {
        let tmp = TempDir::new().unwrap();
        let block = tmp.path().join("block");
        fs::create_dir_all(block.join("sdb")).unwrap();
        let table = tmp.path().join("mounts");
        fs::write(
            &table,
            "/dev/sda1 / ext4 rw 0 0\n/dev/sdb1 /media/kim/MY\\040KEY vfat rw 0 0\n",
        )
        .unwrap();

        let devices = list_devices(&block, &table).await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(
            devices[0].mount_points,
            vec![MountPoint::new("/media/kim/MY KEY")]
        );
    }

    #[tokio::test]
    async fn test_unreadable_mount_table_is_a_device_list_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("block")).unwrap();

        let err = list_devices(&tmp.path().join("block"), &tmp.path().join("absent"))
            .await
            .unwrap_err();
        assert!(matches!(err, NpkiError::DeviceList { .. }));
    }

    #[test]
    fn test_attach_mounts_in_table_order() {
        let mut devices = vec![
            StorageDevice::new("/dev/sda"),
            StorageDevice::new("/dev/sdb").usb(true),
        ];
        let mounts = vec![
            ("/dev/sda2".to_string(), PathBuf::from("/")),
            ("/dev/sdb2".to_string(), PathBuf::from("/media/kim/B")),
            ("proc".to_string(), PathBuf::from("/proc")),
            ("/dev/sdb1".to_string(), PathBuf::from("/media/kim/A")),
        ];

        attach_mounts(&mut devices, &mounts);

        assert_eq!(devices[0].mount_points, vec![MountPoint::new("/")]);
        assert_eq!(
            devices[1].mount_points,
            vec![MountPoint::new("/media/kim/B"), MountPoint::new("/media/kim/A")]
        );
    }

    #[tokio::test]
    async fn test_read_block_devices_from_sysfs_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        // USB stick: /sys/block/sdb -> devices/.../usb2/.../block/sdb
        let usb_dev = root.join("devices/pci0000:00/usb2/2-1/host6/block/sdb");
        fs::create_dir_all(usb_dev.join("device")).unwrap();
        fs::write(usb_dev.join("removable"), "1\n").unwrap();
        fs::write(usb_dev.join("size"), "2048\n").unwrap();
        fs::write(usb_dev.join("device/vendor"), "SanDisk \n").unwrap();
        fs::write(usb_dev.join("device/model"), "Cruzer\n").unwrap();

        let block = root.join("block");
        fs::create_dir_all(block.join("sda")).unwrap();
        fs::write(block.join("sda/removable"), "0\n").unwrap();
        fs::create_dir_all(block.join("loop0")).unwrap();
        std::os::unix::fs::symlink(&usb_dev, block.join("sdb")).unwrap();

        let devices = read_block_devices(&block).await.unwrap();
        let ids: Vec<_> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["/dev/sda", "/dev/sdb"]);

        assert!(!devices[0].is_usb);
        assert!(!devices[0].is_removable);

        let usb = &devices[1];
        assert!(usb.is_usb);
        assert!(usb.is_removable);
        assert_eq!(usb.size_bytes, 2048 * 512);
        assert_eq!(usb.description, "SanDisk Cruzer");
    }

    #[tokio::test]
    async fn test_missing_sys_block_is_a_device_list_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_block_devices(&tmp.path().join("absent")).await.unwrap_err();
        assert!(matches!(err, NpkiError::DeviceList { .. }));
    }
}
