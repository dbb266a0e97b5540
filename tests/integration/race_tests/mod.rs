mod checkpoints;
mod episodes;
mod explosions;
mod observation;
mod pilots;
