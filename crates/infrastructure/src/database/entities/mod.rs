pub mod bins;
pub mod bins_pesaje;
pub mod embarcaciones;
pub mod pesajes;
pub mod pesajes_en_proceso;
