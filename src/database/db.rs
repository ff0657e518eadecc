use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::doc;
use mongodb::{Client, Collection, options::ClientOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DeleteOutcome, PostStore, StoreError};
use crate::post::post_model::Post;

/// Connect to MongoDB and make sure the server answers before serving traffic
pub async fn connect_to_mongo(uri: &str) -> Result<Client, StoreError> {
    let mut client_options = ClientOptions::parse(uri).await?;
    client_options.app_name = Some("posts-service".to_string());

    let client = Client::with_options(client_options)?;

    // Ping the server to see if you can connect to the cluster
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    info!("Connected successfully to MongoDB");

    Ok(client)
}

/// Stored shape of a post; the post id doubles as the primary key
#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    content: String,
    timestamp: Value,
    #[serde(default)]
    image: String,
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(rename = "userEmail", default)]
    user_email: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            timestamp: post.timestamp.clone(),
            image: post.image.clone(),
            user_id: post.user_id.clone(),
            user_email: post.user_email.clone(),
            extra: post.extra.clone(),
        }
    }
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            content: doc.content,
            timestamp: doc.timestamp,
            image: doc.image,
            user_id: doc.user_id,
            user_email: doc.user_email,
            extra: doc.extra,
        }
    }
}

pub struct MongoPostStore {
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    pub fn new(client: &Client, database: &str, table: &str) -> Self {
        let collection = client.database(database).collection::<PostDocument>(table);
        MongoPostStore { collection }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn scan(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<PostDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Post::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Post::from))
    }

    async fn put(&self, post: &Post) -> Result<(), StoreError> {
        self.collection
            .replace_one(doc! { "_id": post.id.as_str() }, PostDocument::from(post))
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn delete_if_exists(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        // Filtering on _id makes the delete a no-op when the post is already gone
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::ConditionFailed)
        }
    }
}
