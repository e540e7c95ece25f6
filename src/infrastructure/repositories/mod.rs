pub mod audio_repository;
pub mod entity_repository;
pub mod http_audio_repository;

pub use audio_repository::AudioRepository;
pub use entity_repository::EntityRepository;
pub use http_audio_repository::HttpAudioRepository;
