mod resolver;

pub use resolver::{
    embed_url, extract_video_id, thumbnail_candidates, MediaResolver, ResolverState,
};
