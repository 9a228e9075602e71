#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::{fixture::ChildPath, prelude::*, TempDir};
use std::{fs, path::Path};

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("tmp").create_dir_all().unwrap();
        Self { dir }
    }

    pub fn write_config(&self, contents: toml::Table) {
        self.dir
            .child("vdpreview.toml")
            .write_str(&contents.to_string())
            .unwrap();
    }

    pub fn add_file(&self, file_name: &str) -> ChildPath {
        let file = self.dir.child("input").child(file_name);
        file.write_binary(&read_test_asset(file_name)).unwrap();
        file
    }

    pub fn temp_files(&self) -> usize {
        fs::read_dir(self.dir.child("tmp").path()).unwrap().count()
    }

    pub fn run(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!();
        cmd.current_dir(self.dir.path());
        cmd
    }
}

pub fn read_test_asset(file_name: &str) -> Vec<u8> {
    let path = Path::new("tests").join("assets").join(file_name);
    fs::read(&path).unwrap()
}
