mod path;
mod printf;
mod prettify;
mod scanf;
mod setf;
mod walker;
