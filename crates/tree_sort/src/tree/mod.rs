mod avl;
mod bucket_index;
mod key_tree;

pub(crate) use bucket_index::BucketIndex;
pub(crate) use key_tree::KeyTree;
