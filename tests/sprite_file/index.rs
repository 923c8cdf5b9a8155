use sprset_rs::prelude::*;
use tempfile::tempdir;

use crate::{assert_matches_set, random_set, save_fresh};

#[test]
fn saved_index_is_used_on_open() {
	let dir = tempdir().unwrap();
	let spr_path = dir.path().join("acsprset.spr");
	let index_path = dir.path().join("sprindex.dat");
	let set = random_set(10, 60);

	let index = save_fresh(&spr_path, &set, &SaveOptions::new(true));
	save_sprite_index(&index_path, &index).unwrap();

	let mut with_index = SprFile::open(&spr_path, &index_path).unwrap();
	let rebuilt = SprFile::open(&spr_path, dir.path().join("missing.dat")).unwrap();

	assert_eq!(with_index.index_source(), IndexSource::IndexFile);
	assert_eq!(rebuilt.index_source(), IndexSource::Rebuilt);
	assert_eq!(with_index.slots(), rebuilt.slots());
	assert_eq!(with_index.metrics(), rebuilt.metrics());
	assert_matches_set(&mut with_index, &set);
}

#[test]
fn stale_index_falls_back_to_scan() {
	let dir = tempdir().unwrap();
	let spr_path = dir.path().join("acsprset.spr");
	let index_path = dir.path().join("sprindex.dat");

	let old = random_set(11, 10);
	let index = save_fresh(&spr_path, &old, &SaveOptions::new(false).with_file_id(1));
	save_sprite_index(&index_path, &index).unwrap();

	// overwrite the container only
	let new = random_set(12, 10);
	save_fresh(&spr_path, &new, &SaveOptions::new(false).with_file_id(2));

	let mut file = SprFile::open(&spr_path, &index_path).unwrap();
	assert_eq!(file.index_source(), IndexSource::Rebuilt);
	assert_matches_set(&mut file, &new);
}

#[test]
fn garbage_index_falls_back_to_scan() {
	let dir = tempdir().unwrap();
	let spr_path = dir.path().join("acsprset.spr");
	let index_path = dir.path().join("sprindex.dat");
	let set = random_set(13, 8);

	save_fresh(&spr_path, &set, &SaveOptions::new(true));
	std::fs::write(&index_path, b"SPRINDEX\x04\x00").unwrap();

	let mut file = SprFile::open(&spr_path, &index_path).unwrap();
	assert_eq!(file.index_source(), IndexSource::Rebuilt);
	assert_matches_set(&mut file, &set);
}

#[test]
fn index_file_round_trip() {
	let dir = tempdir().unwrap();
	let index_path = dir.path().join("sprindex.dat");
	let mut index = SpriteFileIndex::new(42);
	index.push(0, 0, 24);
	index.push(16, 8, 26);

	save_sprite_index(&index_path, &index).unwrap();
	let loaded = SpriteFileIndex::open(&index_path).unwrap();

	assert_eq!(loaded, index);
	assert_eq!(loaded.metric(1), Some(SpriteMetric::new(16, 8)));
}
