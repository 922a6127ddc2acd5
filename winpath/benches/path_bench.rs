use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use winpath::buffer::BufferPool;
use winpath::config::BufferSettings;
use winpath::path::{
    add_extended_prefix, canonicalize, classify, full_path, remove_extended_prefix,
    CurrentDirectories,
};
use winpath::platform::{ScriptedPlatform, ScriptedVolume};
use winpath::VolumeResolver;

const SAMPLES: [(&str, &str); 7] = [
    ("drive_absolute", r"C:\Windows\System32\drivers\etc\hosts"),
    ("drive_relative", r"C:projects\winpath"),
    ("relative", r"src\path\canonicalize.rs"),
    ("unc", r"\\fileserver\builds\nightly\artifact.zip"),
    ("extended_unc", r"\\?\UNC\fileserver\builds\nightly"),
    ("volume_guid", r"\\?\Volume{5f0b1c6e-0000-4000-8000-00000000000c}\Windows"),
    ("device", "CON:Alt"),
];

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for (name, path) in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(name), &path, |b, &path| {
            b.iter(|| classify(black_box(path)));
        });
    }

    group.finish();
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");

    for (name, path) in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(name), &path, |b, &path| {
            b.iter(|| canonicalize(black_box(path)));
        });
    }

    // Already canonical input, the common case
    group.bench_function("fixed_point", |b| {
        b.iter(|| canonicalize(black_box(r"C:\Users\dev\projects\winpath\src")));
    });

    // Navigation and trailing dot/space trimming
    group.bench_function("with_dots", |b| {
        b.iter(|| canonicalize(black_box(r"C:\a\b\..\c\.\d\..\..\e\f. . ")));
    });

    // Many empty segments and forward slashes
    group.bench_function("mixed_separators", |b| {
        b.iter(|| canonicalize(black_box("C:/a//b\\\\c/./d//")));
    });

    group.finish();
}

fn bench_extended_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("extended_prefix");

    let mut long = String::from(r"C:\data");
    while long.len() < 400 {
        long.push_str(r"\directory");
    }
    let extended = add_extended_prefix(&long, false).into_owned();

    group.bench_function("add_long", |b| {
        b.iter(|| add_extended_prefix(black_box(&long), false));
    });

    group.bench_function("add_short_unforced", |b| {
        b.iter(|| add_extended_prefix(black_box(r"C:\Windows"), false));
    });

    group.bench_function("remove", |b| {
        b.iter(|| remove_extended_prefix(black_box(&extended)));
    });

    group.finish();
}

fn bench_full_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_path");

    let dirs = CurrentDirectories::new(r"D:\Temp")
        .and_then(|dirs| dirs.with_drive_directory('C', r"C:\Users\dev"))
        .unwrap();

    for (name, path) in [
        ("relative", r"..\notes\today.txt"),
        ("rooted", r"\Windows\Temp"),
        ("drive_relative", r"C:projects\winpath"),
        ("absolute", r"C:\Windows\System32"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &path, |b, &path| {
            b.iter(|| full_path(black_box(path), &dirs));
        });
    }

    group.finish();
}

fn bench_canonical_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_root");

    let volume = r"\\?\Volume{5f0b1c6e-0000-4000-8000-00000000000c}\";
    let platform = ScriptedPlatform::new()
        .with_volume(volume, ScriptedVolume::ntfs("System", 1))
        .with_mount(r"C:\", volume);
    let resolver = VolumeResolver::new(
        Arc::new(platform),
        Arc::new(BufferPool::default()),
        BufferSettings::default(),
    );

    // Local volume, one scripted native call through the buffer protocol
    group.bench_function("drive", |b| {
        b.iter(|| resolver.canonical_root(black_box(r"C:\Windows\System32")));
    });

    // Network share, no native call
    group.bench_function("unc", |b| {
        b.iter(|| resolver.canonical_root(black_box(r"\\fileserver\builds\nightly")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_canonicalize,
    bench_extended_prefix,
    bench_full_path,
    bench_canonical_root
);
criterion_main!(benches);
