pub mod local_disk;
