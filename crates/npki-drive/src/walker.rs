//! Walk `<save path>/<issuer>/USER/<subject>` directories into records.

use npki_core::{CertificateRecord, DeviceId, NpkiError, Result, SavePathGroup, USER_DIR};
use std::path::Path;
use tracing::{debug, instrument, warn};

use crate::config::MissingUserDirPolicy;
use crate::fs::FileSystem;

/// Walk every save path of every group, strictly one filesystem call at a
/// time, and collect one record per subject directory.
///
/// Records come out in group, save path, issuer, subject order. A save path
/// that is missing or not a directory is skipped. Failing to list a save
/// path that does exist is an error, and so is failing to list an issuer's
/// `USER` directory unless `policy` is [`MissingUserDirPolicy::Skip`].
#[instrument(skip_all, fields(groups = groups.len()))]
pub async fn walk_save_paths<F>(
    fs: &F,
    groups: &[SavePathGroup],
    policy: MissingUserDirPolicy,
) -> Result<Vec<CertificateRecord>>
where
    F: FileSystem + ?Sized,
{
    let mut records = Vec::new();

    for group in groups {
        for save_path in &group.paths {
            walk_save_path(fs, group.device.as_ref(), save_path, policy, &mut records).await?;
        }
    }

    debug!(count = records.len(), "certificate walk finished");
    Ok(records)
}

async fn walk_save_path<F>(
    fs: &F,
    device: Option<&DeviceId>,
    save_path: &Path,
    policy: MissingUserDirPolicy,
    records: &mut Vec<CertificateRecord>,
) -> Result<()>
where
    F: FileSystem + ?Sized,
{
    match fs.stat(save_path).await {
        Ok(stat) if stat.is_directory => {}
        Ok(_) => {
            debug!(path = %save_path.display(), "save path is not a directory, skipping");
            return Ok(());
        }
        Err(e) => {
            debug!(path = %save_path.display(), error = %e, "save path unavailable, skipping");
            return Ok(());
        }
    }

    let issuers = fs
        .list_directory(save_path)
        .await
        .map_err(|e| NpkiError::io(save_path, e))?;

    for issuer in issuers {
        if !issuer.is_directory {
            continue;
        }

        let user_root = save_path.join(&issuer.name).join(USER_DIR);
        let subjects = match fs.list_directory(&user_root).await {
            Ok(subjects) => subjects,
            Err(e) => match policy {
                MissingUserDirPolicy::Abort => return Err(NpkiError::io(user_root, e)),
                MissingUserDirPolicy::Skip => {
                    warn!(
                        path = %user_root.display(),
                        error = %e,
                        "cannot list USER directory, skipping issuer"
                    );
                    continue;
                }
            },
        };

        for subject in subjects {
            if !subject.is_directory {
                continue;
            }
            records.push(CertificateRecord::new(
                device.cloned(),
                save_path,
                &issuer.name,
                &subject.name,
            ));
        }
    }

    Ok(())
}
