//! Tag tree - a trie of normalized tags used for subset matching
//!
//! Every post is placed at the node reached by walking its sorted tags from
//! the root. An entry then finds all posts whose tags it covers with a
//! breadth-first walk that follows any child edge named by one of the
//! entry's own tags.

use super::normalize::normalize_walk;
use std::collections::{BTreeMap, VecDeque};

/// A single node of the tag tree
#[derive(Debug, Clone)]
pub struct TagNode<P> {
    children: BTreeMap<String, TagNode<P>>,
    post: Option<P>,
}

impl<P> Default for TagNode<P> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            post: None,
        }
    }
}

impl<P> TagNode<P> {
    /// Post placed at exactly this path, if any
    pub fn post(&self) -> Option<&P> {
        self.post.as_ref()
    }

    /// Place a post at this node, returning the one it replaced
    pub fn replace_post(&mut self, post: P) -> Option<P> {
        self.post.replace(post)
    }

    /// Child reached by following `tag` (expects a normalized tag)
    pub fn child(&self, tag: &str) -> Option<&TagNode<P>> {
        self.children.get(tag)
    }
}

/// Trie keyed by normalized tag
#[derive(Debug, Clone)]
pub struct TagTree<P> {
    root: TagNode<P>,
}

impl<P> Default for TagTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TagTree<P> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            root: TagNode::default(),
        }
    }

    /// Walk the normalized form of `tags` from the root, creating missing
    /// nodes, and return the node reached.
    ///
    /// Returns `None` for an absent or empty tag set; the caller must skip
    /// that post. The root itself is never returned.
    pub fn attach<I, S>(&mut self, tags: Option<I>) -> Option<&mut TagNode<P>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let walk = normalize_walk(tags)?;

        let mut node = &mut self.root;
        for tag in walk {
            node = node.children.entry(tag).or_default();
        }
        Some(node)
    }

    /// Find every post whose tags are all present in `tags`.
    ///
    /// The result is in breadth-first discovery order and holds each post at
    /// most once. An absent or empty tag set matches nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use daypost::domain::tags::TagTree;
    ///
    /// let mut tree = TagTree::new();
    /// tree.attach(Some(&["Panama"])).unwrap().replace_post("a");
    /// tree.attach(Some(&["Panama", "Bocas del Toro"])).unwrap().replace_post("b");
    ///
    /// let mut found = tree.query(Some(&["bocas del toro", "panama"]));
    /// found.sort();
    /// assert_eq!(found, vec![&"a", &"b"]);
    /// assert!(tree.query(Some(&["Bocas del Toro"])).is_empty());
    /// ```
    pub fn query<I, S>(&self, tags: Option<I>) -> Vec<&P>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(walk) = normalize_walk(tags) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut queue = VecDeque::from([&self.root]);

        while let Some(node) = queue.pop_front() {
            if let Some(post) = node.post() {
                found.push(post);
            }
            // Test the whole walk at every level; only real edges are followed.
            for tag in &walk {
                if let Some(child) = node.child(tag) {
                    queue.push_back(child);
                }
            }
        }

        found
    }

    /// Iterate over every attached post exactly once (depth-first)
    pub fn posts(&self) -> Posts<'_, P> {
        Posts {
            stack: vec![&self.root],
        }
    }

    /// Number of attached posts
    pub fn len(&self) -> usize {
        self.posts().count()
    }

    /// True when no post is attached
    pub fn is_empty(&self) -> bool {
        self.posts().next().is_none()
    }
}

/// Iterator over the posts of a [`TagTree`], see [`TagTree::posts`]
pub struct Posts<'a, P> {
    stack: Vec<&'a TagNode<P>>,
}

impl<'a, P> Iterator for Posts<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values().rev());
            if let Some(post) = node.post() {
                return Some(post);
            }
        }
        None
    }
}
