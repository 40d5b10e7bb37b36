pub use downloader::ObjectDownloader;
pub use lister::ObjectLister;

mod downloader;
mod lister;

#[cfg(test)]
pub(crate) mod stub_storage;
