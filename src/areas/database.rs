//! Object database
//!
//! Content-addressed, write-once storage for blobs and commits. Every object is
//! stored zlib-compressed under its own ID; storing an object that already exists is
//! a no-op, so identical contents are kept exactly once.

use crate::areas::storage::Storage;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, BufReader, Cursor, Read, Write};

// large enough for any `<type> <size>\0` header
const HEADER_READ_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct Database {
    storage: Box<dyn Storage>,
}

impl Database {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Database { storage }
    }

    /// Store `content` as a blob and return its ID.
    pub fn put(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    /// Read the content of the blob with the given ID.
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.parse_object_as_blob(object_id)
            .map(Blob::into_content)
    }

    /// Content `snapshot` records for `name`, if it tracks the file.
    pub fn read_tracked(&self, snapshot: &Snapshot, name: &str) -> anyhow::Result<Option<Bytes>> {
        snapshot.get(name).map(|oid| self.get(oid)).transpose()
    }

    /// Persist an object unless it already exists; returns its ID either way.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;

        // write the object unless it already exists
        if !self.storage.contains(object_id.as_ref())? {
            let object_content = Self::compress(object.serialize()?)?;
            self.storage
                .write(object_id.as_ref(), object_content)
                .with_context(|| format!("Unable to write object {}", object_id))?;

            tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn contains(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        self.storage.contains(object_id.as_ref())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            other => anyhow::bail!(
                "object {} is a {}, expected a blob",
                object_id,
                other.object_type()
            ),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            other => anyhow::bail!(
                "object {} is a {}, expected a commit",
                object_id,
                other.object_type()
            ),
        }
    }

    /// Type of a stored object, decompressing only its header.
    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let object_content = self.read_compressed(object_id)?;
        let mut header_reader = BufReader::with_capacity(
            HEADER_READ_CAPACITY,
            flate2::read::ZlibDecoder::new(&*object_content),
        );

        ObjectType::parse_object_type(&mut header_reader)
            .with_context(|| format!("Unable to read the header of object {}", object_id))
    }

    /// IDs of every stored object, sorted.
    pub fn object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.storage
            .keys()?
            .into_iter()
            .map(ObjectId::try_parse)
            .collect()
    }

    /// IDs of every stored commit, sorted.
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commit_ids = Vec::new();

        for object_id in self.object_ids()? {
            if self.get_object_type(&object_id)? == ObjectType::Commit {
                commit_ids.push(object_id);
            }
        }

        Ok(commit_ids)
    }

    /// Find all objects whose ID starts with the given prefix.
    ///
    /// Returns every match; more than one means the prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .object_ids()?
            .into_iter()
            .filter(|object_id| object_id.starts_with(prefix))
            .collect())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.read_object(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Self::decompress(self.read_compressed(object_id)?)
    }

    fn read_compressed(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.storage
            .read(object_id.as_ref())?
            .with_context(|| format!("object {} not found", object_id))
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}
