#![allow(unused)]

mod common;

use std::sync::Arc;
use std::thread;

use common::{ascii_bytes, write_chain};
use efes::{BLOCK_SIZE, Container, DataBlock, FileEntry, FileSystem};

#[test]
fn test_shared_readers() {
    let mut blocks: Vec<DataBlock> = (0..9).map(|_| DataBlock::empty(0)).collect();
    write_chain(&mut blocks, &[1, 2, 3, 4], &ascii_bytes(4 * BLOCK_SIZE, 20));
    write_chain(&mut blocks, &[8, 7, 6, 5], &ascii_bytes(4 * BLOCK_SIZE, 21));
    let fs = Arc::new(FileSystem::new(
        Container::from_parts(
            vec![
                FileEntry::new("one.bin", 1).unwrap(),
                FileEntry::new("dir/two.bin", 8).unwrap(),
            ],
            blocks,
        )
        .unwrap(),
    ));

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let (path, seed) = if i % 2 == 0 { ("one.bin", 20) } else { ("dir/two.bin", 21) };
                for _ in 0..10 {
                    assert_eq!(fs.read_file(path).unwrap(), ascii_bytes(4 * BLOCK_SIZE, seed));
                    assert_eq!(fs.read_dir(".").unwrap().len(), 2);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
}
