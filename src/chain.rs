//! chain — singly-linked auxiliary image chains (mipmap levels, sibling frames).
//!
//! Модель:
//! - `Chain` владеет головой; каждый `ChainNode` владеет своим хвостом (`next`).
//!   Цепочки не циклические, ссылки только вперёд.
//! - `NodePool` — аллокатор узлов с учётом живых узлов и опциональным бюджетом.
//!   Исчерпание бюджета = OutOfMemory.
//!
//! rebuild_chain(pool, slot, count, max_len):
//! - count == 0: старая цепочка закрывается, слот пуст.
//! - иначе новая цепочка строится во временной области и ставится в слот только
//!   целиком. При нехватке узлов временная цепочка освобождается, старая остаётся
//!   нетронутой. Узлы старой цепочки засчитываются как освобождаемые при проверке
//!   бюджета.

use log::{debug, warn};

use crate::error::{HookError, HookResult};
use crate::image::Image;
use crate::metrics;

/// Which of the parent's two chains an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Mipmaps,
    Frames,
}

impl ChainKind {
    pub fn slot_mut(self, parent: &mut Image) -> &mut Chain {
        match self {
            ChainKind::Mipmaps => &mut parent.mipmaps,
            ChainKind::Frames => &mut parent.frames,
        }
    }

    pub fn slot(self, parent: &Image) -> &Chain {
        match self {
            ChainKind::Mipmaps => &parent.mipmaps,
            ChainKind::Frames => &parent.frames,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChainKind::Mipmaps => "mipmaps",
            ChainKind::Frames => "frames",
        }
    }
}

#[derive(Debug, Default)]
pub struct ChainNode {
    pub image: Image,
    next: Chain,
}

impl ChainNode {
    pub fn next(&self) -> Option<&ChainNode> {
        self.next.head()
    }
}

/// Owned singly-linked chain. Empty chain = no head.
#[derive(Debug, Default)]
pub struct Chain {
    head: Option<Box<ChainNode>>,
}

impl Chain {
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&ChainNode> {
        self.head.as_deref()
    }

    pub fn head_mut(&mut self) -> Option<&mut ChainNode> {
        self.head.as_deref_mut()
    }

    /// Number of nodes reachable from the head.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { cur: self.head() }
    }

    /// Nodes in this chain plus every chain hanging off its images.
    pub fn total_nodes(&self) -> u64 {
        self.iter()
            .map(|n| 1 + n.image.owned_nodes())
            .sum()
    }

    /// Detach the whole chain, leaving this one empty.
    pub fn take(&mut self) -> Chain {
        Chain {
            head: self.head.take(),
        }
    }

    fn push_front(&mut self, mut node: Box<ChainNode>) {
        node.next = self.take();
        self.head = Some(node);
    }
}

// Iterative drop: a recursive Box drop would overflow the stack on long chains.
impl Drop for Chain {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.head.take();
        }
    }
}

pub struct ChainIter<'a> {
    cur: Option<&'a ChainNode>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a ChainNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = node.next();
        Some(node)
    }
}

/// Chain node allocator with live-node bookkeeping.
#[derive(Debug, Default)]
pub struct NodePool {
    budget: Option<u64>,
    live: u64,
    allocated_total: u64,
    released_total: u64,
}

impl NodePool {
    pub fn new(budget: Option<u64>) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    pub fn live(&self) -> u64 {
        self.live
    }

    pub fn allocated_total(&self) -> u64 {
        self.allocated_total
    }

    pub fn released_total(&self) -> u64 {
        self.released_total
    }

    pub fn budget(&self) -> Option<u64> {
        self.budget
    }

    /// Allocate one node. `credit` is the number of live nodes the caller is
    /// about to release; they do not count against the budget.
    /// None on exhaustion.
    pub fn allocate(&mut self, credit: u64) -> Option<Box<ChainNode>> {
        if let Some(b) = self.budget {
            if self.live >= b.saturating_add(credit) {
                return None;
            }
        }
        self.live += 1;
        self.allocated_total += 1;
        metrics::record_chain_node_allocated();
        Some(Box::new(ChainNode::default()))
    }

    /// Release a chain and everything hanging off its images.
    /// Returns the number of nodes released.
    pub fn close(&mut self, chain: Chain) -> u64 {
        let mut work = vec![chain];
        let mut released = 0u64;
        while let Some(mut c) = work.pop() {
            while let Some(mut node) = c.head.take() {
                c.head = node.next.head.take();
                let img = &mut node.image;
                if !img.mipmaps.is_empty() {
                    work.push(img.mipmaps.take());
                }
                if !img.frames.is_empty() {
                    work.push(img.frames.take());
                }
                released += 1;
            }
        }
        self.live = self.live.saturating_sub(released);
        self.released_total += released;
        if released > 0 {
            metrics::record_chain_nodes_released(released);
        }
        released
    }

    /// Release both chains of an image that is going away.
    pub fn close_image(&mut self, mut img: Image) -> u64 {
        self.close(img.mipmaps.take()) + self.close(img.frames.take())
    }
}

/// Replace the chain in `slot` with `count` fresh nodes (see module docs).
pub fn rebuild_chain(
    pool: &mut NodePool,
    slot: &mut Chain,
    count: usize,
    max_len: usize,
) -> HookResult<()> {
    if count > max_len {
        return Err(HookError::ChainTooLong {
            requested: count,
            max: max_len,
        });
    }
    metrics::record_chain_rebuild();

    if count == 0 {
        let n = pool.close(slot.take());
        debug!("rebuild_chain: cleared chain ({} node(s) released)", n);
        return Ok(());
    }

    let credit = slot.total_nodes();
    let mut scratch = Chain::default();
    for built in 0..count {
        match pool.allocate(credit) {
            Some(node) => scratch.push_front(node),
            None => {
                pool.close(scratch);
                metrics::record_chain_rollback();
                warn!(
                    "rebuild_chain: node pool exhausted after {} of {} node(s), previous chain kept",
                    built, count
                );
                return Err(HookError::OutOfMemory);
            }
        }
    }

    let old = std::mem::replace(slot, scratch);
    let n = pool.close(old);
    debug!("rebuild_chain: {} node(s) installed, {} released", count, n);
    Ok(())
}
