use std::{
    cmp::Ordering,
    mem,
    ops::{Bound, RangeBounds},
};

use log::{debug, trace};
use rand::Rng;

use crate::depth::Depth;
use crate::error::Error;

type NodeId = usize;

// Arena slot of the sentinel, every tree reserves slot zero for it.
const NIL: NodeId = 0;

/// Rbt manage a single instance of in-memory index using
/// [red-black][rbt] tree, keyed by `i64` and carrying a `String`
/// payload for each key.
///
/// Nodes are held in an arena owned by the tree and linked by index,
/// with parent links, so that insert and delete can rebalance bottom-up.
/// Duplicate keys are allowed, an equal key always descends to the right.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct Rbt {
    name: String,
    nodes: Vec<Node>, // nodes[NIL] is the sentinel.
    free: Vec<NodeId>, // slots released by delete, reused by insert.
    root: NodeId,
    n_count: usize, // number of entries in the tree.
}

/// Different ways to construct a new Rbt instance.
impl Rbt {
    /// Create an empty instance of Rbt, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Rbt
    where
        S: AsRef<str>,
    {
        Rbt {
            name: name.as_ref().to_string(),
            nodes: vec![Node::sentinel()],
            free: Default::default(),
            root: NIL,
            n_count: Default::default(),
        }
    }

    /// Create a new instance of Rbt tree and load it with entries
    /// from `iter`. Keys need not be unique.
    pub fn load_from<S, I, P>(name: S, iter: I) -> Rbt
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (i64, P)>,
        P: Into<String>,
    {
        let mut rbt = Rbt::new(name);
        for (key, payload) in iter {
            rbt.insert(key, payload);
        }
        debug!("rbt {:?} loaded with {} entries", rbt.name, rbt.n_count);
        rbt
    }
}

/// Maintenance API.
impl Rbt {
    /// Identify this instance. Applications can choose unique names while
    /// creating Rbt instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return quickly with basic statisics, only entries() method is valid
    /// with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node>())
    }

    /// Remove all entries, releasing the arena.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.root = NIL;
        self.n_count = 0;
        self.reset_sentinel();
    }

    /// Return the number of nodes on the longest path from root to a
    /// leaf node. Empty tree has a height of zero.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((x, depth)) = stack.pop() {
            if x == NIL {
                continue;
            }
            height = height.max(depth);
            stack.push((self.left(x), depth + 1));
            stack.push((self.right(x), depth + 1));
        }
        height
    }
}

/// Write operations on Rbt instance.
impl Rbt {
    /// Insert a new {key, payload} entry in the index. If key is already
    /// present, the new entry is placed after the existing ones.
    pub fn insert<P>(&mut self, key: i64, payload: P)
    where
        P: Into<String>,
    {
        let z = self.alloc(key, payload.into());

        let (mut y, mut x) = (NIL, self.root);
        while x != NIL {
            y = x;
            x = if key < self.nodes[x].key {
                self.left(x)
            } else {
                self.right(x)
            };
        }

        self.nodes[z].parent = y;
        if y == NIL {
            self.root = z;
        } else if key < self.nodes[y].key {
            self.nodes[y].left = z;
        } else {
            self.nodes[y].right = z;
        }
        self.n_count += 1;

        self.insert_fixup(z);
        self.reset_sentinel();
    }

    /// Delete key from this instance. Return false if key is not present,
    /// in which case delete is a no-op. When key is duplicated only one
    /// of its entries is removed.
    pub fn delete(&mut self, key: i64) -> bool {
        self.remove(key).is_some()
    }

    /// Same as delete, but return the removed entry.
    pub fn remove(&mut self, key: i64) -> Option<(i64, String)> {
        let z = match self.find(key) {
            Some(z) => z,
            None => {
                debug!("rbt {:?} remove missing key {}", self.name, key);
                return None;
            }
        };

        let (x, removed_color) = if self.left(z) == NIL {
            let x = self.right(z);
            self.transplant(z, x);
            (x, self.color(z))
        } else if self.right(z) == NIL {
            let x = self.left(z);
            self.transplant(z, x);
            (x, self.color(z))
        } else {
            // splice out the in-order successor and put it in z's place.
            let y = self.minimum_of(self.right(z));
            let (x, y_color) = (self.right(y), self.color(y));
            if self.parent(y) == z {
                self.nodes[x].parent = y;
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.nodes[y].right = zr;
                self.nodes[zr].parent = y;
            }
            self.transplant(z, y);
            let zl = self.left(z);
            self.nodes[y].left = zl;
            self.nodes[zl].parent = y;
            let z_color = self.color(z);
            self.set_color(y, z_color);
            (x, y_color)
        };

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        self.n_count -= 1;
        let entry = self.dealloc(z);
        self.reset_sentinel();
        Some(entry)
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Sentinel and root are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Parent links agree with child links.
    /// * Entry count matches the number of reachable nodes.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error> {
        if self.nodes[NIL].is_red() {
            return Err(Error::RedSentinel);
        }
        if self.is_red(self.root) {
            return Err(Error::RedRoot);
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            return Err(Error::BrokenLink(self.nodes[self.root].key));
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<Node>());
        stats.set_depths(Depth::new());
        let mut walk = Walk {
            stats: &mut stats,
            count: 0,
            prev: None,
        };
        let blacks = self.validate_tree(self.root, false, 0, 0, &mut walk)?;
        if walk.count != self.n_count {
            return Err(Error::CountMismatch(self.n_count, walk.count));
        }
        stats.set_blacks(blacks);
        Ok(stats)
    }
}

/// Read operations on Rbt instance.
impl Rbt {
    /// Return the node holding key. If key is duplicated, any one of
    /// them is returned.
    pub fn search(&self, key: i64) -> Option<&Node> {
        self.find(key).map(|x| &self.nodes[x])
    }

    /// Return the first node, in sort order, whose payload matches
    /// `payload`. Tree is not ordered by payload, hence this is a
    /// full scan.
    pub fn search_payload(&self, payload: &str) -> Option<&Node> {
        let mut x = self.first();
        while x != NIL {
            if self.nodes[x].payload == payload {
                return Some(&self.nodes[x]);
            }
            x = self.next_node(x);
        }
        None
    }

    /// Return the root node, None for an empty tree.
    pub fn root(&self) -> Option<&Node> {
        self.to_node(self.root)
    }

    /// Return the entry with the smallest key.
    pub fn minimum(&self) -> Option<(i64, &str)> {
        self.to_node(self.first()).map(Node::as_entry)
    }

    /// Return the entry with the largest key.
    pub fn maximum(&self) -> Option<(i64, &str)> {
        self.to_node(self.last()).map(Node::as_entry)
    }

    /// Return the node with the largest key strictly less than `key`.
    /// `key` itself need not be present in the tree.
    pub fn predecessor(&self, key: i64) -> Option<&Node> {
        let (mut x, mut pred) = (self.root, NIL);
        while x != NIL {
            if self.nodes[x].key < key {
                pred = x;
                x = self.right(x);
            } else {
                x = self.left(x);
            }
        }
        self.to_node(pred)
    }

    /// Return the node with the smallest key strictly greater than `key`.
    /// `key` itself need not be present in the tree.
    pub fn successor(&self, key: i64) -> Option<&Node> {
        let (mut x, mut succ) = (self.root, NIL);
        while x != NIL {
            if self.nodes[x].key > key {
                succ = x;
                x = self.left(x);
            } else {
                x = self.right(x);
            }
        }
        self.to_node(succ)
    }

    /// Return (predecessor, successor) of `key`. If `key` is not present
    /// in the tree, return (None, None).
    pub fn pred_succ(&self, key: i64) -> (Option<&Node>, Option<&Node>) {
        match self.find(key) {
            Some(_) => (self.predecessor(key), self.successor(key)),
            None => (None, None),
        }
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(i64, &str)> {
        if self.root == NIL {
            return None;
        }
        let mut x = self.root;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => self.left(x),
                _ => self.right(x),
            };
            if at_depth == 0 || next == NIL {
                break Some(self.nodes[x].as_entry());
            }
            at_depth -= 1;
            x = next;
        }
    }

    /// Return an iterator over all entries in this instance, in sort
    /// order. Iterator can be created any number of times, each one
    /// starts afresh from the smallest key.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            rbt: self,
            stack: vec![],
        };
        iter.push_left(self.root);
        iter
    }

    /// Range over all entries from low to high.
    pub fn range<R>(&self, range: R) -> Range<'_>
    where
        R: RangeBounds<i64>,
    {
        let low: Bound<i64> = match range.start_bound() {
            Bound::Included(key) => Bound::Included(*key),
            Bound::Excluded(key) => Bound::Excluded(*key),
            Bound::Unbounded => Bound::Unbounded,
        };
        let high: Bound<i64> = match range.end_bound() {
            Bound::Included(key) => Bound::Included(*key),
            Bound::Excluded(key) => Bound::Excluded(*key),
            Bound::Unbounded => Bound::Unbounded,
        };

        Range {
            rbt: self,
            next: self.seek_low(&low),
            low,
            high,
        }
    }
}

impl Rbt {
    fn alloc(&mut self, key: i64, payload: String) -> NodeId {
        let node = Node::new(key, payload, Color::Red);
        match self.free.pop() {
            Some(x) => {
                self.nodes[x] = node;
                x
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    // release the slot of a node that is already unlinked from the tree.
    fn dealloc(&mut self, z: NodeId) -> (i64, String) {
        debug_assert!(z != NIL, "dealloc(): freeing the sentinel ? Call the programmer");
        let node = &mut self.nodes[z];
        let payload = mem::take(&mut node.payload);
        node.left = NIL;
        node.right = NIL;
        node.parent = NIL;
        node.set_black();
        self.free.push(z);
        (node.key, payload)
    }

    // transplant and delete_fixup park a parent link on the sentinel,
    // drop it once the operation is over.
    fn reset_sentinel(&mut self) {
        let nil = &mut self.nodes[NIL];
        debug_assert!(nil.left == NIL && nil.right == NIL);
        nil.parent = NIL;
        nil.set_black();
    }

    fn find(&self, key: i64) -> Option<NodeId> {
        let mut x = self.root;
        while x != NIL {
            let node = &self.nodes[x];
            x = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(x),
            };
        }
        None
    }

    #[inline]
    fn to_node(&self, x: NodeId) -> Option<&Node> {
        if x == NIL {
            None
        } else {
            Some(&self.nodes[x])
        }
    }

    fn minimum_of(&self, mut x: NodeId) -> NodeId {
        while self.left(x) != NIL {
            x = self.left(x);
        }
        x
    }

    fn maximum_of(&self, mut x: NodeId) -> NodeId {
        while self.right(x) != NIL {
            x = self.right(x);
        }
        x
    }

    fn first(&self) -> NodeId {
        if self.root == NIL {
            NIL
        } else {
            self.minimum_of(self.root)
        }
    }

    fn last(&self) -> NodeId {
        if self.root == NIL {
            NIL
        } else {
            self.maximum_of(self.root)
        }
    }

    // in-order successor of node x, climbing parent links when x has no
    // right subtree.
    fn next_node(&self, mut x: NodeId) -> NodeId {
        if self.right(x) != NIL {
            return self.minimum_of(self.right(x));
        }
        let mut y = self.parent(x);
        while y != NIL && x == self.right(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    fn prev_node(&self, mut x: NodeId) -> NodeId {
        if self.left(x) != NIL {
            return self.maximum_of(self.left(x));
        }
        let mut y = self.parent(x);
        while y != NIL && x == self.left(y) {
            x = y;
            y = self.parent(y);
        }
        y
    }

    // first node, in sort order, that falls within the low bound.
    fn seek_low(&self, low: &Bound<i64>) -> NodeId {
        let (mut x, mut found) = (self.root, NIL);
        while x != NIL {
            let key = self.nodes[x].key;
            let within = match low {
                Bound::Included(low) => key >= *low,
                Bound::Excluded(low) => key > *low,
                Bound::Unbounded => true,
            };
            if within {
                found = x;
                x = self.left(x);
            } else {
                x = self.right(x);
            }
        }
        found
    }

    // last node, in sort order, that falls within the high bound.
    fn seek_high(&self, high: &Bound<i64>) -> NodeId {
        let (mut x, mut found) = (self.root, NIL);
        while x != NIL {
            let key = self.nodes[x].key;
            let within = match high {
                Bound::Included(high) => key <= *high,
                Bound::Excluded(high) => key < *high,
                Bound::Unbounded => true,
            };
            if within {
                found = x;
                x = self.right(x);
            } else {
                x = self.left(x);
            }
        }
        found
    }

    #[inline]
    fn left(&self, x: NodeId) -> NodeId {
        self.nodes[x].left
    }

    #[inline]
    fn right(&self, x: NodeId) -> NodeId {
        self.nodes[x].right
    }

    #[inline]
    fn parent(&self, x: NodeId) -> NodeId {
        self.nodes[x].parent
    }

    #[inline]
    fn color(&self, x: NodeId) -> Color {
        self.nodes[x].color
    }

    #[inline]
    fn set_color(&mut self, x: NodeId, color: Color) {
        self.nodes[x].color = color
    }

    #[inline]
    fn is_red(&self, x: NodeId) -> bool {
        self.nodes[x].is_red()
    }

    #[inline]
    fn is_black(&self, x: NodeId) -> bool {
        self.nodes[x].is_black()
    }

    fn validate_tree(
        &self,
        x: NodeId,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<usize, Error> {
        if x == NIL {
            if let Some(depths) = walk.stats.depths.as_mut() {
                depths.sample(depth);
            }
            return Ok(nb);
        }
        walk.count += 1;

        let node = &self.nodes[x];
        let red = node.is_red();
        if fromred && red {
            return Err(Error::ConsecutiveReds(node.key));
        }
        if !red {
            nb += 1;
        }
        for child in [node.left, node.right].iter() {
            if *child != NIL && self.parent(*child) != x {
                return Err(Error::BrokenLink(self.nodes[*child].key));
            }
        }

        let lblacks = self.validate_tree(node.left, red, nb, depth + 1, walk)?;
        if let Some(prev) = walk.prev {
            if prev > node.key {
                return Err(Error::SortError(node.key, prev));
            }
        }
        walk.prev = Some(node.key);
        let rblacks = self.validate_tree(node.right, red, nb, depth + 1, walk)?;
        if lblacks != rblacks {
            let err = format!("key: {} left: {} right: {}", node.key, lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }
}

struct Walk<'a> {
    stats: &'a mut Stats,
    count: usize,
    prev: Option<i64>,
}

//--------- insert and delete fixup ----------------

impl Rbt {
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent(z)) {
            // parent is red, hence not root, hence grand-parent exists.
            let p = self.parent(z);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    trace!("insert_fixup(): red uncle at {}", self.nodes[g].key);
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    trace!("insert_fixup(): red uncle at {}", self.nodes[g].key);
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // x carries an extra black, which is pushed up the tree or absorbed
    // by rotating a red from the sibling's side.
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.is_black(x) {
            let p = self.parent(x);
            if x == self.left(p) {
                let mut w = self.right(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    w = self.right(p);
                }
                debug_assert!(w != NIL, "delete_fixup(): sibling is sentinel");
                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    trace!("delete_fixup(): push black up from {}", self.nodes[p].key);
                    self.set_color(w, Color::Red);
                    x = p;
                } else {
                    if self.is_black(self.right(w)) {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(p);
                    }
                    let p_color = self.color(p);
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    let wr = self.right(w);
                    self.set_color(wr, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut w = self.left(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    w = self.left(p);
                }
                debug_assert!(w != NIL, "delete_fixup(): sibling is sentinel");
                if self.is_black(self.right(w)) && self.is_black(self.left(w)) {
                    trace!("delete_fixup(): push black up from {}", self.nodes[p].key);
                    self.set_color(w, Color::Red);
                    x = p;
                } else {
                    if self.is_black(self.left(w)) {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(p);
                    }
                    let p_color = self.color(p);
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    let wl = self.left(w);
                    self.set_color(wl, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }

    // replace subtree rooted at u with subtree rooted at v, v's children
    // are left untouched. v's parent link is set even when v is the
    // sentinel, delete_fixup climbs from there.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let up = self.parent(u);
        trace!("transplant(): {} under {}", self.nodes[u].key, self.nodes[up].key);
        if up == NIL {
            self.root = v;
        } else if u == self.left(up) {
            self.nodes[up].left = v;
        } else {
            self.nodes[up].right = v;
        }
        self.nodes[v].parent = up;
    }

    //--------- rotation routines ----------------

    //              (i)                       (i)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //          left     y                 x       yr
    //                  / \               / \
    //                yl   yr          left  yl
    //
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert!(y != NIL, "rotate_left(): no right child ? Call the programmer");
        trace!("rotate_left(): at {}", self.nodes[x].key);

        let yl = self.left(y);
        self.nodes[x].right = yl;
        if yl != NIL {
            self.nodes[yl].parent = x;
        }

        let xp = self.parent(x);
        self.nodes[y].parent = xp;
        if xp == NIL {
            self.root = y;
        } else if x == self.left(xp) {
            self.nodes[xp].left = y;
        } else {
            self.nodes[xp].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    //              (i)                       (i)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //           y      right             yl       x
    //          / \                               / \
    //        yl   yr                           yr  right
    //
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert!(y != NIL, "rotate_right(): no left child ? Call the programmer");
        trace!("rotate_right(): at {}", self.nodes[x].key);

        let yr = self.right(y);
        self.nodes[x].left = yr;
        if yr != NIL {
            self.nodes[yr].parent = x;
        }

        let xp = self.parent(x);
        self.nodes[y].parent = xp;
        if xp == NIL {
            self.root = y;
        } else if x == self.right(xp) {
            self.nodes[xp].right = y;
        } else {
            self.nodes[xp].left = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }
}

/// Iterator over all entries of [`Rbt`] in sort order. Descends
/// left-root-right keeping the pending ancestors on a stack.
pub struct Iter<'a> {
    rbt: &'a Rbt,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut x: NodeId) {
        while x != NIL {
            self.stack.push(x);
            x = self.rbt.left(x);
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i64, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rbt = self.rbt;
        let x = self.stack.pop()?;
        self.push_left(rbt.right(x));
        Some(rbt.nodes[x].as_entry())
    }
}

/// Iterator over a range of entries in ascending order, refer to
/// [`Rbt::range`].
pub struct Range<'a> {
    rbt: &'a Rbt,
    next: NodeId,
    low: Bound<i64>,
    high: Bound<i64>,
}

impl<'a> Range<'a> {
    /// Iterate over the same range in descending order.
    pub fn rev(self) -> Reverse<'a> {
        Reverse {
            rbt: self.rbt,
            next: self.rbt.seek_high(&self.high),
            low: self.low,
        }
    }
}

impl<'a> Iterator for Range<'a> {
    type Item = (i64, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rbt = self.rbt;
        let node = rbt.to_node(self.next)?;
        let ok = match &self.high {
            Bound::Unbounded => true,
            Bound::Included(qigh) => node.key <= *qigh,
            Bound::Excluded(qigh) => node.key < *qigh,
        };
        if ok {
            self.next = rbt.next_node(self.next);
            Some(node.as_entry())
        } else {
            self.next = NIL;
            None
        }
    }
}

/// Iterator over a range of entries in descending order, refer to
/// [`Range::rev`].
pub struct Reverse<'a> {
    rbt: &'a Rbt,
    next: NodeId,
    low: Bound<i64>,
}

impl<'a> Iterator for Reverse<'a> {
    type Item = (i64, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rbt = self.rbt;
        let node = rbt.to_node(self.next)?;
        let ok = match &self.low {
            Bound::Unbounded => true,
            Bound::Included(qow) => node.key >= *qow,
            Bound::Excluded(qow) => node.key > *qow,
        };
        if ok {
            self.next = rbt.prev_node(self.next);
            Some(node.as_entry())
        } else {
            self.next = NIL;
            None
        }
    }
}

/// Color of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Node corresponds to a single entry in Rbt instance.
#[derive(Clone, Debug)]
pub struct Node {
    key: i64,
    payload: String,
    color: Color,
    left: NodeId,   // store: left child or NIL
    right: NodeId,  // store: right child or NIL
    parent: NodeId, // store: parent or NIL for root
}

// Primary operations on a single node.
impl Node {
    // CREATE operation
    fn new(key: i64, payload: String, color: Color) -> Node {
        Node {
            key,
            payload,
            color,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }

    fn sentinel() -> Node {
        Node::new(Default::default(), Default::default(), Color::Black)
    }

    /// Return the key of this entry.
    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Return the payload of this entry.
    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Return the color of this node.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    fn as_entry(&self) -> (i64, &str) {
        (self.key, &self.payload)
    }

    #[inline]
    fn set_black(&mut self) {
        self.color = Color::Black
    }
}

/// Statistics on [`Rbt`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Rbt::stats`] method.
/// * To get full statisics via [`Rbt::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Rbt`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for each entry in `Rbt`.
    /// Payload bytes live on the heap and are not counted. EG, on
    /// 64-bit targets:
    ///
    /// ```
    /// use rbt_index::Rbt;
    /// let rbt = Rbt::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of payload handle: 24 bytes
    /// // links and color: 32 bytes, after padding
    /// assert_eq!(rbt.stats().node_size(), 64);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        self.depths
            .as_ref()
            .filter(|depths| depths.samples() > 0)
            .cloned()
    }
}

#[cfg(test)]
impl Rbt {
    // corrupt the tree on purpose, to exercise validate().
    pub(crate) fn force_color(&mut self, key: i64, color: Color) {
        if let Some(x) = self.find(key) {
            self.set_color(x, color)
        }
    }

    pub(crate) fn force_sentinel_color(&mut self, color: Color) {
        self.set_color(NIL, color)
    }
}
