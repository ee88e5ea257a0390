//! 文件系统相关工具

use std::path::Path;
use walkdir::WalkDir;

/// 递归计算目录的总大小
///
/// 遍历 dir_path 下的所有文件（含任意深度的子目录），返回字节数之和。
/// 用 u128 累加，确保任何实际规模的游戏库都不会溢出。
///
/// 根路径不存在、不是目录、或任何一项无法读取时整体失败，
/// 不返回部分结果，也没有中途取消的机制。
pub fn directory_size(dir_path: &Path) -> Result<u128, String> {
    if !dir_path.exists() {
        return Err(format!("路径不存在: {}", dir_path.display()));
    }
    if !dir_path.is_dir() {
        return Err(format!("路径不是目录: {}", dir_path.display()));
    }

    let mut total: u128 = 0;

    for entry in WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| format!("读取目录项失败: {}", e))?;
        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .map_err(|e| format!("读取文件元数据失败 {}: {}", entry.path().display(), e))?;
            total += metadata.len() as u128;
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_directory_has_size_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(directory_size(dir.path()).unwrap(), 0);
    }

    #[test]
    fn sums_files_across_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();

        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("b.bin"), vec![0u8; 250]).unwrap();

        let deep = sub.join("deep");
        fs::create_dir(&deep).unwrap();
        fs::write(deep.join("c.bin"), vec![0u8; 7]).unwrap();
        fs::write(deep.join("empty.bin"), Vec::<u8>::new()).unwrap();

        assert_eq!(directory_size(dir.path()).unwrap(), 357);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(directory_size(&missing).is_err());
    }

    #[test]
    fn file_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        assert!(directory_size(&file).is_err());
    }
}
