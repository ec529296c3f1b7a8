//! Integration tests against a flite-like source layout
//!
//! Runs the full pass with the default configuration: guard the platform
//! audio and mmap backends, then relocate every quoted include.

use incfix_core::Config;
use incfix_rewrite::{FileIndex, RewriteOptions, Rewriter};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const AU_ALSA: &str = r#"/* ALSA audio backend */
#include <alsa/asoundlib.h>
#include "cst_string.h"
#include "cst_wave.h"
#include "cst_audio.h"

int audio_open_alsa(void) { return 0; }
"#;

const CST_WAVE_C: &str = r#"#include "cst_string.h"
#include "cst_val.h"
#include "../include/cst_wave.h"
#include "cst_not_ported.h"
"#;

fn create_flite_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let files: &[(&str, &str)] = &[
        ("include/cst_string.h", "#pragma once\n"),
        ("include/cst_wave.h", "#pragma once\n#include \"cst_val.h\"\n"),
        ("include/cst_val.h", "#pragma once\n"),
        ("audio/cst_audio.h", "#pragma once\n"),
        ("audio/au_alsa.c", AU_ALSA),
        ("audio/au_oss.c", "int oss;\n"),
        ("audio/au_palmos.c", "int palmos;\n"),
        ("audio/au_pulseaudio.c", "int pulse;\n"),
        ("audio/au_sun.c", "int sun;\n"),
        ("audio/au_win.c", "int win;\n"),
        ("audio/au_wince.c", "#ifndef ARDUINO\nint wince;\n#endif\n"),
        ("audio/au_none.c", "#include \"cst_audio.h\"\n"),
        ("utils/cst_file_palmos.c", "int f;\n"),
        ("utils/cst_file_wince.c", "int f;\n"),
        ("utils/cst_mmap_posix.c", "int m;\n"),
        ("utils/cst_mmap_win32.c", "int m;\n"),
        ("speech/cst_wave.c", CST_WAVE_C),
        ("README", "#include \"cst_val.h\"\n"),
    ];

    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    temp
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

#[test]
fn test_full_pass_with_default_config() {
    let temp = create_flite_tree();
    let root = temp.path();
    let config = Config::default();

    let index = FileIndex::build(root, &config.index).unwrap();
    assert_eq!(index.len(), 18);

    let rewriter = Rewriter::new(&index, RewriteOptions::from(&config));
    let report = rewriter.run(&config.guard.files).unwrap();

    assert_eq!(report.guarded.len(), 10);
    assert_eq!(report.already_guarded.len(), 1);
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].quoted, "cst_not_ported.h");
    assert_eq!(report.unresolved[0].line, 4);

    assert_eq!(
        read(root, "audio/au_alsa.c"),
        r#"#ifndef ARDUINO
/* ALSA audio backend */
#include <alsa/asoundlib.h>
#include "include/cst_string.h"
#include "include/cst_wave.h"
#include "audio/cst_audio.h"

int audio_open_alsa(void) { return 0; }
#endif
"#
    );
    assert_eq!(
        read(root, "speech/cst_wave.c"),
        r#"#include "include/cst_string.h"
#include "include/cst_val.h"
#include "include/cst_wave.h"
#include "cst_not_ported.h"
"#
    );
    assert_eq!(read(root, "audio/au_wince.c"), "#ifndef ARDUINO\nint wince;\n#endif\n");
    assert_eq!(read(root, "audio/au_none.c"), "#include \"audio/cst_audio.h\"\n");
    assert_eq!(read(root, "README"), "#include \"cst_val.h\"\n");
}

#[test]
fn test_second_pass_changes_nothing() {
    let temp = create_flite_tree();
    let root = temp.path();
    let config = Config::default();

    let index = FileIndex::build(root, &config.index).unwrap();
    let rewriter = Rewriter::new(&index, RewriteOptions::from(&config));
    rewriter.run(&config.guard.files).unwrap();
    let alsa_after_first = read(root, "audio/au_alsa.c");

    let report = rewriter.run(&config.guard.files).unwrap();

    assert_eq!(report.files_changed, 0);
    assert!(report.guarded.is_empty());
    assert_eq!(report.already_guarded.len(), 11);
    assert_eq!(read(root, "audio/au_alsa.c"), alsa_after_first);
}
