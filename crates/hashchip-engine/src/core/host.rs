use anyhow::{bail, Result};

use super::policy::TrustedMarkup;

/// Opaque handle to a content block, issued by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

/// A document whose content blocks carry `#tags`.
///
/// In the browser this is the task list, and the blocks are its
/// `div > html-blob` elements. Ids from [`blocks`](Self::blocks) only need
/// to stay valid until the next call.
pub trait ContentHost {
    /// Blocks currently in the document, in document order.
    fn blocks(&self) -> Vec<BlockId>;

    /// Current markup of a block, or `None` if it is gone.
    fn read(&self, id: BlockId) -> Option<String>;

    /// Replaces a block's markup.
    fn render(&mut self, id: BlockId, markup: TrustedMarkup) -> Result<()>;
}

/// In-memory [`ContentHost`], used by the studio front end and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    blocks: Vec<Option<String>>,
    renders: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block and returns its id.
    pub fn push(&mut self, content: impl Into<String>) -> BlockId {
        self.blocks.push(Some(content.into()));
        BlockId(self.blocks.len() as u64 - 1)
    }

    /// Overwrites a block as an outside edit would. Unlike `render` this does
    /// not count as a render.
    pub fn edit(&mut self, id: BlockId, content: impl Into<String>) -> Result<()> {
        *self.slot(id)? = Some(content.into());
        Ok(())
    }

    pub fn remove(&mut self, id: BlockId) -> Result<()> {
        *self.slot(id)? = None;
        Ok(())
    }

    pub fn content(&self, id: BlockId) -> Option<&str> {
        self.blocks.get(id.0 as usize)?.as_deref()
    }

    /// Remaining blocks in document order.
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| b.as_deref())
    }

    /// Number of successful `render` calls so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    fn slot(&mut self, id: BlockId) -> Result<&mut Option<String>> {
        match self.blocks.get_mut(id.0 as usize) {
            Some(slot) if slot.is_some() => Ok(slot),
            _ => bail!("no block with id {}", id.0),
        }
    }
}

impl ContentHost for MemoryHost {
    fn blocks(&self) -> Vec<BlockId> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_some())
            .map(|(i, _)| BlockId(i as u64))
            .collect()
    }

    fn read(&self, id: BlockId) -> Option<String> {
        self.content(id).map(str::to_string)
    }

    fn render(&mut self, id: BlockId, markup: TrustedMarkup) -> Result<()> {
        *self.slot(id)? = Some(markup.into_string());
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut host = MemoryHost::new();
        let a = host.push("a");
        let b = host.push("b");
        assert_eq!(host.blocks(), vec![a, b]);
        assert_eq!(host.read(b).as_deref(), Some("b"));
    }

    #[test]
    fn removed_blocks_disappear() {
        let mut host = MemoryHost::new();
        let a = host.push("a");
        let b = host.push("b");
        host.remove(a).unwrap();
        assert_eq!(host.blocks(), vec![b]);
        assert_eq!(host.read(a), None);
        assert!(host.render(a, TrustedMarkup::assume_trusted("x".into())).is_err());
    }

    #[test]
    fn render_counts_but_edit_does_not() {
        let mut host = MemoryHost::new();
        let a = host.push("a");
        host.edit(a, "b").unwrap();
        assert_eq!(host.render_count(), 0);
        host.render(a, TrustedMarkup::assume_trusted("c".into())).unwrap();
        assert_eq!(host.render_count(), 1);
        assert_eq!(host.contents().collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut host = MemoryHost::new();
        assert!(host.edit(BlockId(3), "x").is_err());
    }
}
