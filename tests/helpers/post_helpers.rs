use blog_server::{
    database::repositories::{like::LikesRepository, post::PostRepository},
    entities::community::post_entity::{CreatePost, Post},
    middleware::mw_ctx::{CtxState, MapCache},
    services::post_service::PostService,
};
use fake::{faker, Fake};

#[allow(dead_code)]
pub fn post_service(
    ctx_state: &CtxState,
    threshold: usize,
) -> PostService<'_, MapCache, LikesRepository, PostRepository> {
    PostService::new(
        &ctx_state.cache,
        &ctx_state.db.likes,
        &ctx_state.db.posts,
        &ctx_state.like_locks,
        threshold,
    )
}

#[allow(dead_code)]
pub fn fake_post_input(author_id: i64, topic: Option<&str>) -> CreatePost {
    CreatePost {
        title: faker::lorem::en::Sentence(2..5).fake::<String>(),
        content: faker::lorem::en::Paragraph(1..3).fake::<String>(),
        topic: topic.map(|t| t.to_string()),
        author_id,
    }
}

#[allow(dead_code)]
pub async fn create_fake_post(ctx_state: &CtxState, author_id: i64) -> Post {
    ctx_state
        .post_service()
        .create_post(fake_post_input(author_id, None))
        .await
        .expect("post created")
}
